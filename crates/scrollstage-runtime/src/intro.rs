#![forbid(unsafe_code)]

//! Load-time intro playback.
//!
//! The hero section's entrance on initial page load is the one piece of
//! choreography not driven by scroll: it plays once, on a clock, before the
//! user has scrolled anywhere. Rather than a second timeline type, the
//! intro reuses [`SectionTimeline`] and derives its progress from elapsed
//! time over a fixed duration — the scrub contract doesn't care where the
//! progress value comes from.

use std::time::Duration;

use scrollstage_core::{SectionTimeline, StyleState};

/// One-shot, `dt`-driven playback of a section timeline.
#[derive(Debug, Clone)]
pub struct IntroPlayer {
    timeline: SectionTimeline,
    duration: Duration,
    elapsed: Duration,
}

impl IntroPlayer {
    /// Play `timeline` over `duration`. A zero duration is clamped to 1 ns
    /// (the first tick completes the intro).
    #[must_use]
    pub fn new(timeline: SectionTimeline, duration: Duration) -> Self {
        let mut player = Self {
            timeline,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            elapsed: Duration::ZERO,
        };
        player.timeline.scrub(0.0);
        player
    }

    /// Advance playback by one frame.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.timeline.scrub(self.progress());
    }

    /// Playback progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }

    /// Whether playback has finished.
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Resolved state of an intro target.
    #[must_use]
    pub fn state_of(&self, target: &str) -> Option<StyleState> {
        self.timeline.state_of(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollstage_core::{Easing, Keyframe, StylePatch};

    fn wordmark_intro() -> SectionTimeline {
        SectionTimeline::new().with_keyframe(
            Keyframe::tween("wordmark", 0.0, 1.0)
                .from(StylePatch::new().opacity(0.0).scale(0.98))
                .to(StylePatch::new().opacity(1.0).scale(1.0))
                .easing(Easing::Linear),
        )
    }

    #[test]
    fn starts_at_entrance_state() {
        let player = IntroPlayer::new(wordmark_intro(), Duration::from_millis(1100));
        let s = player.state_of("wordmark").unwrap();
        assert_eq!(s.opacity, 0.0);
        assert!((s.scale - 0.98).abs() < 1e-6);
    }

    #[test]
    fn plays_to_completion() {
        let mut player = IntroPlayer::new(wordmark_intro(), Duration::from_millis(1000));
        for _ in 0..60 {
            player.tick(Duration::from_millis(17));
        }
        assert!(player.is_done());
        assert_eq!(player.progress(), 1.0);
        let s = player.state_of("wordmark").unwrap();
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.scale, 1.0);
    }

    #[test]
    fn midway_is_partially_faded() {
        let mut player = IntroPlayer::new(wordmark_intro(), Duration::from_millis(1000));
        player.tick(Duration::from_millis(500));
        let s = player.state_of("wordmark").unwrap();
        assert!((s.opacity - 0.5).abs() < 1e-3);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut player = IntroPlayer::new(wordmark_intro(), Duration::ZERO);
        player.tick(Duration::from_nanos(1));
        assert!(player.is_done());
    }
}
