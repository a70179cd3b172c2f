#![forbid(unsafe_code)]

//! Scroll coordinate spaces.
//!
//! Two coordinate spaces exist side by side:
//!
//! - **Pixel space**: raw scroll offsets, `0..=extent` where the extent is
//!   document height minus viewport height. Sections register their pinned
//!   ranges in this space, and the ranges stay fixed across resizes as long
//!   as the layout they describe does.
//! - **Normalized space**: pixel values divided by the extent, `[0, 1]`.
//!   The snap resolver works exclusively here so its buffer constant means
//!   the same thing on every page length.
//!
//! Storing ranges in pixels and normalizing on demand is deliberate: when a
//! resize changes the extent by a factor `k`, every normalized range rescales
//! by `1/k` while the pixel region it describes is untouched.

/// Total scrollable distance in pixels (document height minus viewport
/// height). Recomputed by the host on content or layout change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollExtent(f64);

impl ScrollExtent {
    /// Wrap a raw pixel extent. Any value is accepted; a non-positive or
    /// non-finite extent simply reports as not scrollable.
    #[inline]
    #[must_use]
    pub fn new(px: f64) -> Self {
        Self(px)
    }

    /// Raw pixel value.
    #[inline]
    #[must_use]
    pub fn px(&self) -> f64 {
        self.0
    }

    /// Whether normalization against this extent is meaningful.
    #[inline]
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Map a pixel offset into normalized `[0, 1]` space.
    ///
    /// Returns `None` when the extent is not scrollable.
    #[inline]
    #[must_use]
    pub fn normalize(&self, offset_px: f64) -> Option<f64> {
        if self.is_scrollable() {
            Some(offset_px / self.0)
        } else {
            None
        }
    }

    /// Map a normalized position back into pixel space.
    #[inline]
    #[must_use]
    pub fn denormalize(&self, value: f64) -> f64 {
        value * self.0
    }
}

/// A pinned section's scroll range, `start < end`, in either coordinate
/// space depending on context (pixel in the registry, normalized in the
/// resolver).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinnedRange {
    /// Scroll position where the section pins (progress 0).
    pub start: f64,
    /// Scroll position where the section releases (progress 1).
    pub end: f64,
}

impl PinnedRange {
    /// Create a range. Validity (`start < end`, both finite) is checked at
    /// registration time, not here.
    #[inline]
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whether the range can participate in progress mapping and snapping.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start < self.end
    }

    /// Range length in its own coordinate space.
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// The range rescaled into normalized space.
    ///
    /// Returns `None` when the extent is not scrollable.
    #[must_use]
    pub fn normalized(&self, extent: ScrollExtent) -> Option<PinnedRange> {
        let start = extent.normalize(self.start)?;
        let end = extent.normalize(self.end)?;
        Some(PinnedRange { start, end })
    }

    /// Membership test with a symmetric hysteresis buffer on both edges.
    ///
    /// The buffer makes snapping engage slightly before the strict pinned
    /// range and release slightly after it, avoiding jitter at exact
    /// boundaries.
    #[inline]
    #[must_use]
    pub fn contains_buffered(&self, value: f64, buffer: f64) -> bool {
        value >= self.start - buffer && value <= self.end + buffer
    }

    /// The section's rest point: `start + length * ratio`.
    #[inline]
    #[must_use]
    pub fn settle_point(&self, ratio: f64) -> f64 {
        self.start + self.length() * ratio
    }
}
