#![forbid(unsafe_code)]

//! Scroll offset → per-section normalized progress.
//!
//! The mapping runs on every scroll tick for every currently relevant
//! section, so it is a single subtraction, division, and clamp — no
//! allocation, no branching beyond the clamp.
//!
//! # Invariants
//!
//! 1. `section_progress(range.start, range) == 0.0` (section just pinned).
//! 2. `section_progress(range.end, range) == 1.0` (section fully exited).
//! 3. Monotonic non-decreasing in `offset` for a fixed range.
//! 4. Output is always in `[0.0, 1.0]`, including for offsets outside the
//!    range and for invalid ranges (which map to 0.0).

use crate::geometry::PinnedRange;

/// Normalized progress of `offset` through `range`, clamped to `[0, 1]`.
///
/// Invalid ranges (zero or negative length, non-finite bounds) yield 0.0
/// rather than NaN so a malformed registration can never poison a timeline.
#[inline]
#[must_use]
pub fn section_progress(offset: f64, range: &PinnedRange) -> f32 {
    if !range.is_valid() {
        return 0.0;
    }
    let t = (offset - range.start) / range.length();
    t.clamp(0.0, 1.0) as f32
}
