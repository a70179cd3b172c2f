#![forbid(unsafe_code)]

//! The host-side scroll surface.

/// What the director needs from the host's viewport: the current scroll
/// offset, the total scrollable extent, and a way to write the offset back
/// during a corrective glide.
///
/// Implementations are expected to clamp writes to `[0, extent]`.
pub trait ScrollViewport {
    /// Current scroll offset in pixels.
    fn offset(&self) -> f64;

    /// Total scrollable distance in pixels (document height minus viewport
    /// height). May legitimately be zero when content fits on screen.
    fn extent(&self) -> f64;

    /// Programmatic scroll write. Hosts typically echo this back through
    /// their scroll event stream; the director accounts for that.
    fn set_offset(&mut self, offset: f64);
}

/// In-process viewport for tests and the demo driver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemoryViewport {
    offset: f64,
    extent: f64,
}

impl MemoryViewport {
    /// Viewport at offset zero with the given extent.
    #[must_use]
    pub fn new(extent: f64) -> Self {
        Self {
            offset: 0.0,
            extent,
        }
    }

    /// Simulate a layout change. The offset is re-clamped.
    pub fn set_extent(&mut self, extent: f64) {
        self.extent = extent;
        self.offset = self.offset.clamp(0.0, extent.max(0.0));
    }
}

impl ScrollViewport for MemoryViewport {
    fn offset(&self) -> f64 {
        self.offset
    }

    fn extent(&self) -> f64 {
        self.extent
    }

    fn set_offset(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.extent.max(0.0));
    }
}
