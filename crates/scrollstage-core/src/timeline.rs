#![forbid(unsafe_code)]

//! Progress-scrubbed keyframe timelines.
//!
//! Each pinned section authors one ordered list of [`Keyframe`]s over its
//! own normalized progress. The scrubbing contract is strict:
//!
//! - [`SectionTimeline::scrub`] may be called at arbitrary, possibly
//!   non-monotonic progress values (the user scrolls back).
//! - It is idempotent: the same progress always produces the same resolved
//!   states. Resolution starts from each target's base state on every call;
//!   there is no hidden state beyond `progress`.
//! - No keyframe depends on wall-clock time. Callers that want time-driven
//!   playback (the load-time intro) derive a progress value from elapsed
//!   time and scrub with it.
//!
//! # Bands
//!
//! Choreography is partitioned into three bands along section progress:
//! entrance (≈ 0.00–0.30, content animates in), hold (≈ 0.30–0.70, content
//! static and fully visible — where settle points are authored to land),
//! and exit (≈ 0.70–1.00, content animates out). [`Band::at`] classifies a
//! progress value; the bands are conventions for authoring and validation,
//! not hard constraints on keyframe spans.
//!
//! # Invariants
//!
//! 1. Keyframes are always sorted by span start (maintained on insertion);
//!    equal starts keep insertion order.
//! 2. Later keyframes on the same target apply over earlier ones.
//! 3. Resolved states are a pure function of `progress`.

use crate::easing::Easing;

/// Upper edge of the entrance band.
pub const ENTRANCE_END: f32 = 0.30;

/// Upper edge of the hold band.
pub const HOLD_END: f32 = 0.70;

/// Which choreography band a progress value falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Content animating to fully visible.
    Entrance,
    /// Content static and fully visible.
    Hold,
    /// Content animating out ahead of the next section.
    Exit,
}

impl Band {
    /// Classify a section-progress value.
    #[must_use]
    pub fn at(progress: f32) -> Band {
        if progress < ENTRANCE_END {
            Band::Entrance
        } else if progress < HOLD_END {
            Band::Hold
        } else {
            Band::Exit
        }
    }
}

// ---------------------------------------------------------------------------
// Style state
// ---------------------------------------------------------------------------

/// Resolved visual state of one animation target. The host maps these onto
/// whatever it renders with; the engine only interpolates them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleState {
    /// Opacity, 0.0–1.0.
    pub opacity: f32,
    /// Horizontal translation (host units, e.g. vw).
    pub x: f32,
    /// Vertical translation (host units, e.g. vh).
    pub y: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Rotation around the X axis, degrees.
    pub rotate_x: f32,
    /// Horizontal-only scale (growing rules).
    pub scale_x: f32,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotate_x: 0.0,
            scale_x: 1.0,
        }
    }
}

/// Sparse set of style fields; unset fields leave the resolved state
/// untouched. Builder-style setters keep authored keyframes readable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StylePatch {
    /// Opacity override.
    pub opacity: Option<f32>,
    /// X translation override.
    pub x: Option<f32>,
    /// Y translation override.
    pub y: Option<f32>,
    /// Uniform scale override.
    pub scale: Option<f32>,
    /// X-rotation override.
    pub rotate_x: Option<f32>,
    /// X-scale override.
    pub scale_x: Option<f32>,
}

impl StylePatch {
    /// Empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            opacity: None,
            x: None,
            y: None,
            scale: None,
            rotate_x: None,
            scale_x: None,
        }
    }

    /// Set opacity.
    #[must_use]
    pub const fn opacity(mut self, v: f32) -> Self {
        self.opacity = Some(v);
        self
    }

    /// Set x translation.
    #[must_use]
    pub const fn x(mut self, v: f32) -> Self {
        self.x = Some(v);
        self
    }

    /// Set y translation.
    #[must_use]
    pub const fn y(mut self, v: f32) -> Self {
        self.y = Some(v);
        self
    }

    /// Set uniform scale.
    #[must_use]
    pub const fn scale(mut self, v: f32) -> Self {
        self.scale = Some(v);
        self
    }

    /// Set x-rotation.
    #[must_use]
    pub const fn rotate_x(mut self, v: f32) -> Self {
        self.rotate_x = Some(v);
        self
    }

    /// Set x-scale.
    #[must_use]
    pub const fn scale_x(mut self, v: f32) -> Self {
        self.scale_x = Some(v);
        self
    }
}

// ---------------------------------------------------------------------------
// Keyframes
// ---------------------------------------------------------------------------

/// Where a keyframe lives on its section's progress axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeSpan {
    /// Tween start, section progress.
    pub start: f32,
    /// Tween end; `None` makes the keyframe an instantaneous step at
    /// `start` (`from` before, `to` at and after).
    pub end: Option<f32>,
}

impl KeyframeSpan {
    /// Local interpolation parameter at `progress`, in `[0, 1]`.
    ///
    /// A degenerate span (`end <= start`) behaves like a step.
    #[must_use]
    pub fn local_t(&self, progress: f32) -> f32 {
        match self.end {
            Some(end) if end > self.start => {
                ((progress - self.start) / (end - self.start)).clamp(0.0, 1.0)
            }
            _ => {
                if progress >= self.start {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// One declarative tween: `target` moves from `from` to `to` across `span`,
/// shaped by `easing`.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    /// Animation target label (host-defined: "bg", "headline", "card_0", …).
    pub target: String,
    /// State at the start of the span; fields absent here tween from the
    /// target's resolved state instead.
    pub from: StylePatch,
    /// State at the end of the span; fields absent here are not tweened.
    pub to: StylePatch,
    /// Shaping curve.
    pub easing: Easing,
    /// Position on the section's progress axis.
    pub span: KeyframeSpan,
}

impl Keyframe {
    /// A tween from `start` to `end` progress.
    #[must_use]
    pub fn tween(target: &str, start: f32, end: f32) -> Self {
        Self {
            target: target.to_string(),
            from: StylePatch::new(),
            to: StylePatch::new(),
            easing: Easing::default(),
            span: KeyframeSpan {
                start,
                end: Some(end),
            },
        }
    }

    /// An instantaneous step at `start` progress.
    #[must_use]
    pub fn step(target: &str, start: f32) -> Self {
        Self {
            target: target.to_string(),
            from: StylePatch::new(),
            to: StylePatch::new(),
            easing: Easing::Linear,
            span: KeyframeSpan { start, end: None },
        }
    }

    /// Set the start patch.
    #[must_use]
    pub fn from(mut self, patch: StylePatch) -> Self {
        self.from = patch;
        self
    }

    /// Set the end patch.
    #[must_use]
    pub fn to(mut self, patch: StylePatch) -> Self {
        self.to = patch;
        self
    }

    /// Set the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Apply this keyframe onto a resolved state at `progress`.
    fn apply(&self, state: &mut StyleState, progress: f32) {
        let t = self.easing.apply(self.span.local_t(progress));
        tween_field(&mut state.opacity, self.from.opacity, self.to.opacity, t);
        tween_field(&mut state.x, self.from.x, self.to.x, t);
        tween_field(&mut state.y, self.from.y, self.to.y, t);
        tween_field(&mut state.scale, self.from.scale, self.to.scale, t);
        tween_field(&mut state.rotate_x, self.from.rotate_x, self.to.rotate_x, t);
        tween_field(&mut state.scale_x, self.from.scale_x, self.to.scale_x, t);
    }
}

/// Interpolate one field. A `from`-only field pins the value for the whole
/// keyframe; a `to`-only field tweens from the current resolved value.
fn tween_field(current: &mut f32, from: Option<f32>, to: Option<f32>, t: f32) {
    match (from, to) {
        (Some(a), Some(b)) => *current = a + (b - a) * t,
        (None, Some(b)) => *current = *current + (b - *current) * t,
        (Some(a), None) => *current = a,
        (None, None) => {}
    }
}

// ---------------------------------------------------------------------------
// Section timeline
// ---------------------------------------------------------------------------

/// One section's choreography: keyframes plus the most recent scrub result.
#[derive(Debug, Clone, Default)]
pub struct SectionTimeline {
    /// Sorted by span start (invariant 1).
    keyframes: Vec<Keyframe>,
    /// Distinct target labels, first-seen order.
    targets: Vec<String>,
    /// Resolved state per target, parallel to `targets`.
    resolved: Vec<StyleState>,
    progress: f32,
}

impl SectionTimeline {
    /// Empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyframe (builder pattern).
    #[must_use]
    pub fn with_keyframe(mut self, keyframe: Keyframe) -> Self {
        self.push(keyframe);
        self
    }

    /// Add a keyframe, maintaining span-start order.
    pub fn push(&mut self, keyframe: Keyframe) {
        if !self.targets.iter().any(|t| *t == keyframe.target) {
            self.targets.push(keyframe.target.clone());
            self.resolved.push(StyleState::default());
        }
        let pos = self
            .keyframes
            .partition_point(|k| k.span.start <= keyframe.span.start);
        self.keyframes.insert(pos, keyframe);
    }

    /// Scrub to `progress` (clamped to `[0, 1]`), resolving every target's
    /// state from scratch. Safe to call with non-monotonic values.
    pub fn scrub(&mut self, progress: f32) {
        let p = progress.clamp(0.0, 1.0);
        self.progress = p;
        for (idx, state) in self.resolved.iter_mut().enumerate() {
            *state = StyleState::default();
            let target = &self.targets[idx];
            for kf in self.keyframes.iter().filter(|k| k.target == *target) {
                kf.apply(state, p);
            }
        }
    }

    /// Most recent scrub position.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Resolved state of a target after the most recent scrub.
    #[must_use]
    pub fn state_of(&self, target: &str) -> Option<StyleState> {
        let idx = self.targets.iter().position(|t| t == target)?;
        Some(self.resolved[idx])
    }

    /// All `(target, state)` pairs from the most recent scrub.
    pub fn states(&self) -> impl Iterator<Item = (&str, StyleState)> {
        self.targets
            .iter()
            .map(String::as_str)
            .zip(self.resolved.iter().copied())
    }

    /// Number of keyframes.
    #[inline]
    #[must_use]
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Number of distinct targets.
    #[inline]
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Whether the timeline has no keyframes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entrance_fade() -> SectionTimeline {
        SectionTimeline::new().with_keyframe(
            Keyframe::tween("headline", 0.08, 0.30)
                .from(StylePatch::new().opacity(0.0).y(-40.0))
                .to(StylePatch::new().opacity(1.0).y(0.0))
                .easing(Easing::Linear),
        )
    }

    #[test]
    fn band_classification() {
        assert_eq!(Band::at(0.0), Band::Entrance);
        assert_eq!(Band::at(0.29), Band::Entrance);
        assert_eq!(Band::at(0.30), Band::Hold);
        assert_eq!(Band::at(0.52), Band::Hold);
        assert_eq!(Band::at(0.70), Band::Exit);
        assert_eq!(Band::at(1.0), Band::Exit);
    }

    #[test]
    fn before_span_holds_from_state() {
        let mut tl = entrance_fade();
        tl.scrub(0.0);
        let s = tl.state_of("headline").unwrap();
        assert_eq!(s.opacity, 0.0);
        assert_eq!(s.y, -40.0);
    }

    #[test]
    fn after_span_holds_to_state() {
        let mut tl = entrance_fade();
        tl.scrub(0.5);
        let s = tl.state_of("headline").unwrap();
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.y, 0.0);
    }

    #[test]
    fn midpoint_interpolates() {
        let mut tl = entrance_fade();
        tl.scrub(0.19); // halfway through 0.08..0.30
        let s = tl.state_of("headline").unwrap();
        assert!((s.opacity - 0.5).abs() < 1e-6);
        assert!((s.y - -20.0).abs() < 1e-4);
    }

    #[test]
    fn easing_shapes_interpolation() {
        let mut tl = SectionTimeline::new().with_keyframe(
            Keyframe::tween("x", 0.0, 1.0)
                .from(StylePatch::new().opacity(0.0))
                .to(StylePatch::new().opacity(1.0))
                .easing(Easing::Power2Out),
        );
        tl.scrub(0.5);
        assert!((tl.state_of("x").unwrap().opacity - 0.75).abs() < 1e-6);
    }

    #[test]
    fn scrub_is_idempotent() {
        let mut tl = entrance_fade();
        tl.scrub(0.19);
        let first = tl.state_of("headline").unwrap();
        tl.scrub(0.19);
        assert_eq!(tl.state_of("headline").unwrap(), first);
    }

    #[test]
    fn round_trip_reproduces_entrance_state() {
        let mut tl = entrance_fade();
        tl.scrub(0.0);
        let at_zero = tl.state_of("headline").unwrap();

        tl.scrub(1.0);
        tl.scrub(0.0);
        assert_eq!(tl.state_of("headline").unwrap(), at_zero);
    }

    #[test]
    fn non_monotonic_scrubbing() {
        let mut tl = entrance_fade();
        for p in [0.3, 0.1, 0.9, 0.19, 0.19, 0.0, 1.0, 0.19] {
            tl.scrub(p);
        }
        // Final state depends only on the last progress value.
        let s = tl.state_of("headline").unwrap();
        assert!((s.opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn instantaneous_step() {
        let mut tl = SectionTimeline::new().with_keyframe(
            Keyframe::step("overlay", 0.5)
                .from(StylePatch::new().opacity(0.0))
                .to(StylePatch::new().opacity(1.0)),
        );
        tl.scrub(0.49);
        assert_eq!(tl.state_of("overlay").unwrap().opacity, 0.0);
        tl.scrub(0.5);
        assert_eq!(tl.state_of("overlay").unwrap().opacity, 1.0);
    }

    #[test]
    fn later_keyframe_wins_on_same_target() {
        // Entrance fade-in then exit fade-out, GSAP-style fromTo pairs.
        let mut tl = SectionTimeline::new()
            .with_keyframe(
                Keyframe::tween("bg", 0.0, 0.22)
                    .from(StylePatch::new().opacity(0.0))
                    .to(StylePatch::new().opacity(1.0))
                    .easing(Easing::Linear),
            )
            .with_keyframe(
                Keyframe::tween("bg", 0.78, 1.0)
                    .from(StylePatch::new().opacity(1.0))
                    .to(StylePatch::new().opacity(0.0))
                    .easing(Easing::Linear),
            );

        tl.scrub(0.5); // hold band: entered, not yet exiting
        assert_eq!(tl.state_of("bg").unwrap().opacity, 1.0);
        tl.scrub(0.89); // halfway through exit
        assert!((tl.state_of("bg").unwrap().opacity - 0.5).abs() < 1e-6);
        tl.scrub(1.0);
        assert_eq!(tl.state_of("bg").unwrap().opacity, 0.0);
    }

    #[test]
    fn to_only_field_tweens_from_resolved_state() {
        let mut tl = SectionTimeline::new().with_keyframe(
            Keyframe::tween("card", 0.0, 1.0)
                .to(StylePatch::new().opacity(0.0))
                .easing(Easing::Linear),
        );
        // Base opacity is 1.0; tween toward 0.0.
        tl.scrub(0.5);
        assert!((tl.state_of("card").unwrap().opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn from_only_field_pins_value() {
        let mut tl = SectionTimeline::new().with_keyframe(
            Keyframe::tween("card", 0.2, 0.4).from(StylePatch::new().scale(1.06)),
        );
        for p in [0.0, 0.3, 1.0] {
            tl.scrub(p);
            assert_eq!(tl.state_of("card").unwrap().scale, 1.06);
        }
    }

    #[test]
    fn untouched_fields_keep_base_state() {
        let mut tl = entrance_fade();
        tl.scrub(0.19);
        let s = tl.state_of("headline").unwrap();
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.scale_x, 1.0);
        assert_eq!(s.rotate_x, 0.0);
    }

    #[test]
    fn keyframes_sorted_on_insertion() {
        let tl = SectionTimeline::new()
            .with_keyframe(Keyframe::tween("a", 0.78, 1.0))
            .with_keyframe(Keyframe::tween("a", 0.0, 0.22))
            .with_keyframe(Keyframe::tween("a", 0.18, 0.42));
        assert_eq!(tl.keyframe_count(), 3);
        assert_eq!(tl.target_count(), 1);
    }

    #[test]
    fn scrub_clamps_progress() {
        let mut tl = entrance_fade();
        tl.scrub(2.0);
        assert_eq!(tl.progress(), 1.0);
        tl.scrub(-1.0);
        assert_eq!(tl.progress(), 0.0);
    }

    #[test]
    fn unknown_target_is_none() {
        let tl = entrance_fade();
        assert!(tl.state_of("nope").is_none());
    }

    #[test]
    fn degenerate_span_acts_as_step() {
        let mut tl = SectionTimeline::new().with_keyframe(
            Keyframe::tween("a", 0.5, 0.5)
                .from(StylePatch::new().opacity(0.0))
                .to(StylePatch::new().opacity(1.0)),
        );
        tl.scrub(0.4);
        assert_eq!(tl.state_of("a").unwrap().opacity, 0.0);
        tl.scrub(0.6);
        assert_eq!(tl.state_of("a").unwrap().opacity, 1.0);
    }
}
