#![forbid(unsafe_code)]

//! Presentation content as data.
//!
//! The choreography engine only needs to know that sections exist, expose a
//! pinned range, and accept a progress value. Everything a section *is* —
//! its pin span, settle ratio, and keyframes — lives here as plain data:
//! one [`Deck`] of [`DeckSection`] records, loadable from TOML or taken
//! from the built-in deck. There are no per-section types; two sections
//! that differ only in copy and timing differ only in data.

pub mod builtin;
pub mod config;
pub mod deck;

pub use config::DeckError;
pub use deck::{Deck, DeckSection, IntroSpec};
