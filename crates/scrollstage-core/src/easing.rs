#![forbid(unsafe_code)]

//! Easing curves.
//!
//! Pure shaping functions on `[0, 1]`, matching the curves the presentation
//! content was authored against: `Linear` for background scrubs, `Power2In`
//! for exits, `Power2Out` for entrances and corrective settling, plus
//! `Smoothstep` for symmetric glides. Input is clamped so callers can feed
//! raw interpolation parameters without pre-clamping.

/// An easing curve applied to a normalized interpolation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Identity: constant-rate scrub.
    Linear,
    /// Quadratic ease-in: slow start, fast finish. Used for exits.
    Power2In,
    /// Quadratic ease-out: fast start, slow finish. Used for entrances and
    /// corrective scrolls.
    #[default]
    Power2Out,
    /// Quadratic ease-in-out.
    Power2InOut,
    /// Hermite smoothstep: `t² (3 − 2t)`.
    Smoothstep,
}

impl Easing {
    /// Apply the curve to `t`, clamping input to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power2In => t * t,
            Easing::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            Easing::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Power2In,
        Easing::Power2Out,
        Easing::Power2InOut,
        Easing::Smoothstep,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        for ease in ALL {
            assert_eq!(ease.apply(-1.0), 0.0);
            assert_eq!(ease.apply(2.0), 1.0);
        }
    }

    #[test]
    fn monotonic_on_unit_interval() {
        for ease in ALL {
            let mut prev = 0.0f32;
            for i in 1..=100 {
                let v = ease.apply(i as f32 / 100.0);
                assert!(v >= prev, "{ease:?} not monotonic at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn power2_shapes() {
        assert!((Easing::Power2In.apply(0.5) - 0.25).abs() < 1e-6);
        assert!((Easing::Power2Out.apply(0.5) - 0.75).abs() < 1e-6);
        assert!((Easing::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::Smoothstep.apply(0.5) - 0.5).abs() < 1e-6);
    }
}
