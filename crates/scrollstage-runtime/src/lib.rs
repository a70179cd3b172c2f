#![forbid(unsafe_code)]

//! Frame-driven director for the scroll choreography engine.
//!
//! Single-threaded and cooperative: the host calls [`Director::on_scroll`]
//! and [`Director::on_resize`] from its event handlers (they only record
//! pending input) and [`Director::frame`] once per animation frame, which is
//! where all real work happens — input coalescing (last value wins), per
//! section progress mapping and timeline scrubbing, settle detection, and
//! the corrective scroll tween.
//!
//! The global scroll position is the only shared mutable state. Only the
//! director's corrective path writes it through [`ScrollViewport`], and only
//! while its re-entrancy guard is up: a corrective write echoes back through
//! the host's scroll handler, and without the guard that echo would be taken
//! for user input and re-trigger resolution, oscillating forever.

pub mod director;
pub mod intro;
pub mod tween;
pub mod viewport;

pub use director::{Director, DirectorConfig};
pub use intro::IntroPlayer;
pub use tween::CorrectiveTween;
pub use viewport::{MemoryViewport, ScrollViewport};
