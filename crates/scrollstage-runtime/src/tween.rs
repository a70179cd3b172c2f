#![forbid(unsafe_code)]

//! Corrective scroll tween.
//!
//! An eased interpolation between two pixel offsets, advanced by frame `dt`.
//! Sampling is a pure function of elapsed time, so re-sampling without a
//! tick is stable, and [`CorrectiveTween::retarget`] can splice a new
//! destination in mid-flight without a visible jump (it restarts from the
//! current sample).

use std::time::Duration;

use scrollstage_core::Easing;

/// A single in-flight corrective glide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectiveTween {
    from: f64,
    to: f64,
    easing: Easing,
    duration: Duration,
    elapsed: Duration,
}

impl CorrectiveTween {
    /// Start a glide. A zero duration is clamped to 1 ns so the first tick
    /// completes it instead of dividing by zero.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            easing,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            elapsed: Duration::ZERO,
        }
    }

    /// Advance by `dt` and return the new offset.
    pub fn tick(&mut self, dt: Duration) -> f64 {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.sample()
    }

    /// Offset at the current elapsed time.
    #[must_use]
    pub fn sample(&self) -> f64 {
        let t = (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        let eased = f64::from(self.easing.apply(t as f32));
        self.from + (self.to - self.from) * eased
    }

    /// Swap the destination mid-flight, restarting from the current sample.
    pub fn retarget(&mut self, to: f64, duration: Duration) {
        *self = Self::new(self.sample(), to, duration, self.easing);
    }

    /// Glide destination.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Whether the glide has reached its destination.
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}
