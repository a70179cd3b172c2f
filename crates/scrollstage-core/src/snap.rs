#![forbid(unsafe_code)]

//! Settle-point resolution.
//!
//! Given the instantaneous global scroll position (normalized to `[0, 1]`),
//! the resolver decides whether the position lies inside any pinned
//! section's buffered range and, if so, which settle point the viewport
//! should glide to. Releasing a scroll gesture mid-section must never leave
//! the page half-transitioned; the settle points are authored to land in
//! each section's hold band, where content is static and fully visible.
//!
//! # Algorithm
//!
//! 1. Widen every section's normalized range by a symmetric buffer
//!    ([`SNAP_BUFFER`] by default) into a hysteresis band.
//! 2. If the position is inside no band, pass it through unchanged — free
//!    scroll.
//! 3. Otherwise pick the settle point with minimum absolute distance across
//!    **all** sections, not just the one containing the position. Ties
//!    break toward the earlier section in iteration order (ascending range
//!    start, registration order among equal starts). Snapping across a
//!    section boundary when two sections sit very close together is
//!    long-standing observed behavior; it is pinned by a conformance test
//!    here and must not be "corrected".
//! 4. Wrap the target in a corrective command with a distance-scaled,
//!    bounded duration and an ease-out curve — settling is an animated
//!    glide, never a jump.
//!
//! # Failure Modes
//!
//! A dead extent, an empty section list, or a registry that has not passed
//! its readiness barrier all produce a disabled resolver that passes every
//! value through untouched.

use std::time::Duration;

use crate::easing::Easing;
use crate::geometry::{PinnedRange, ScrollExtent};
use crate::registry::SectionRegistry;

/// Hysteresis buffer added to each edge of every pinned range, in
/// normalized units. Makes snapping engage slightly outside the strict
/// range so boundary jitter cannot toggle membership.
pub const SNAP_BUFFER: f64 = 0.03;

/// Shortest corrective glide.
pub const MIN_SETTLE: Duration = Duration::from_millis(120);

/// Longest corrective glide.
pub const MAX_SETTLE: Duration = Duration::from_millis(250);

/// Normalized travel distance at which the glide duration saturates at
/// [`MAX_SETTLE`].
const SETTLE_SATURATION_DISTANCE: f64 = 0.1;

/// A corrective scroll the viewport controller should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCommand {
    /// Glide destination, normalized global scroll position.
    pub target: f64,
    /// Glide duration, already clamped to `[MIN_SETTLE, MAX_SETTLE]`.
    pub duration: Duration,
    /// Glide easing.
    pub easing: Easing,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    /// Normalized pinned range.
    range: PinnedRange,
    /// Normalized settle point, precomputed at build time.
    settle: f64,
}

/// Resolves scroll positions to settle points. Cheap to rebuild; the owner
/// rebuilds it whenever the scroll extent changes or the registry's
/// membership does.
#[derive(Debug, Clone, Default)]
pub struct SnapResolver {
    /// Iteration order is the registry's: ascending range start.
    candidates: Vec<Candidate>,
    buffer: f64,
}

impl SnapResolver {
    /// A permanently pass-through resolver.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Build from the registry against the current extent.
    ///
    /// Returns a disabled resolver when the extent is not scrollable, the
    /// registry is empty, or the registry has not passed its readiness
    /// barrier (operating on a partial list would give the global-nearest
    /// selection wrong semantics).
    #[must_use]
    pub fn build(registry: &SectionRegistry, extent: ScrollExtent) -> Self {
        Self::build_with_buffer(registry, extent, SNAP_BUFFER)
    }

    /// [`SnapResolver::build`] with an explicit buffer width.
    #[must_use]
    pub fn build_with_buffer(
        registry: &SectionRegistry,
        extent: ScrollExtent,
        buffer: f64,
    ) -> Self {
        if !registry.is_ready() {
            tracing::debug!("snap resolver disabled: registry not ready");
            return Self::disabled();
        }
        if registry.is_empty() || !extent.is_scrollable() {
            tracing::debug!(
                sections = registry.len(),
                extent = extent.px(),
                "snap resolver disabled: nothing to snap against"
            );
            return Self::disabled();
        }

        let candidates = registry
            .sections()
            .iter()
            .filter_map(|s| {
                let range = s.range.normalized(extent)?;
                Some(Candidate {
                    range,
                    settle: range.settle_point(s.settle_ratio),
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            candidates = candidates.len(),
            buffer,
            "snap resolver rebuilt"
        );
        Self { candidates, buffer }
    }

    /// Whether the resolver can issue corrections at all.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Map a normalized scroll position to where it should settle.
    ///
    /// Pure and idempotent: positions outside every buffered range come back
    /// unchanged, and a settle point maps to itself.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        let in_pinned = self
            .candidates
            .iter()
            .any(|c| c.range.contains_buffered(value, self.buffer));
        if !in_pinned {
            return value;
        }

        // Global nearest across every candidate; strict `<` keeps the
        // earliest candidate on exact ties.
        let mut nearest = value;
        let mut min_distance = f64::INFINITY;
        for c in &self.candidates {
            let distance = (value - c.settle).abs();
            if distance < min_distance {
                min_distance = distance;
                nearest = c.settle;
            }
        }
        nearest
    }

    /// Resolve a position into a corrective command, or `None` when no
    /// correction is needed (free scroll, or already settled).
    #[must_use]
    pub fn resolve(&self, value: f64) -> Option<SnapCommand> {
        let target = self.snap(value);
        let distance = (target - value).abs();
        if distance < 1e-9 {
            return None;
        }

        let t = (distance / SETTLE_SATURATION_DISTANCE).clamp(0.0, 1.0);
        let duration = MIN_SETTLE + (MAX_SETTLE - MIN_SETTLE).mul_f64(t);

        tracing::debug!(value, target, ?duration, "corrective scroll resolved");
        Some(SnapCommand {
            target,
            duration,
            easing: Easing::Power2Out,
        })
    }
}
