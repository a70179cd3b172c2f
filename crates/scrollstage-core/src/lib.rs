#![forbid(unsafe_code)]

//! Scroll choreography engine for pinned-section presentations.
//!
//! A long-form presentation is a sequence of full-viewport sections that pin
//! in place while an internal animation timeline plays out, then release as
//! the user keeps scrolling. This crate holds the parts of that system with
//! actual algorithmic content:
//!
//! - [`geometry`] — scroll coordinate spaces and pinned ranges.
//! - [`progress`] — pure mapping from scroll offset to per-section progress.
//! - [`registry`] — ordered section registration with a readiness barrier.
//! - [`snap`] — settle-point resolution with buffered membership.
//! - [`timeline`] / [`easing`] — progress-scrubbed keyframe timelines.
//!
//! Everything here is in-process and host-agnostic: no clocks, no I/O, no
//! rendering. The host supplies scroll offsets and receives resolved visual
//! states plus corrective scroll commands.

pub mod easing;
pub mod geometry;
pub mod progress;
pub mod registry;
pub mod snap;
pub mod timeline;

pub use easing::Easing;
pub use geometry::{PinnedRange, ScrollExtent};
pub use progress::section_progress;
pub use registry::{RegistryError, Section, SectionId, SectionRegistry};
pub use snap::{SnapCommand, SnapResolver};
pub use timeline::{Band, Keyframe, KeyframeSpan, SectionTimeline, StylePatch, StyleState};
