#![forbid(unsafe_code)]

//! TOML deck configuration.
//!
//! A deck file is a list of `[[section]]` tables, each with an optional
//! list of `[[section.keyframe]]` tables:
//!
//! ```toml
//! [[section]]
//! name = "thesis"
//! span = 1.5
//! settle_ratio = 0.5
//!
//! [[section.keyframe]]
//! target = "headline"
//! at = 0.08
//! until = 0.30
//! ease = "power2.out"
//! from = { opacity = 0.0, y = -40.0 }
//! to = { opacity = 1.0, y = 0.0 }
//! ```
//!
//! Parsing and validation are strict at the file level (unknown fields,
//! unknown eases, and out-of-range spans are errors — a typo in a deck file
//! should fail loudly at load time, not silently drop choreography). Range
//! problems discovered later, at registration time, degrade per section
//! instead.

use serde::Deserialize;

use scrollstage_core::{Easing, Keyframe, StylePatch};

/// Deck-file problems. All surface at load time.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// TOML syntax or shape error.
    #[error("failed to parse deck config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A deck with no sections can't present anything.
    #[error("deck has no sections")]
    Empty,

    /// Section names must be unique; they key diagnostics and lookups.
    #[error("duplicate section name `{0}`")]
    DuplicateSection(String),

    /// Pin spans are in viewport heights and must be positive.
    #[error("section `{name}` has invalid span {span}")]
    InvalidSpan {
        /// Section name.
        name: String,
        /// Offending span.
        span: f64,
    },

    /// Settle ratio outside `[0, 1]`.
    #[error("section `{name}` has settle ratio {ratio} outside [0, 1]")]
    InvalidSettleRatio {
        /// Section name.
        name: String,
        /// Offending ratio.
        ratio: f64,
    },

    /// Keyframe span outside the section's `[0, 1]` progress axis.
    #[error("section `{section}` keyframe for `{target}` has span outside [0, 1]")]
    InvalidKeyframeSpan {
        /// Section name.
        section: String,
        /// Keyframe target.
        target: String,
    },

    /// Unrecognized ease name.
    #[error("section `{section}` keyframe for `{target}` uses unknown ease `{ease}`")]
    UnknownEase {
        /// Section name.
        section: String,
        /// Keyframe target.
        target: String,
        /// The unrecognized name.
        ease: String,
    },
}

/// Root of a deck file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckConfig {
    /// Sections in page order.
    #[serde(default)]
    pub section: Vec<SectionConfig>,
}

/// One `[[section]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    /// Unique section name.
    pub name: String,

    /// Pin span in viewport heights (`1.5` ≙ the section holds for 150 % of
    /// a viewport of scrolling).
    #[serde(default = "default_span")]
    pub span: f64,

    /// Whether the section pins and snaps at all. Unpinned sections occupy
    /// layout but register no range.
    #[serde(default = "default_pinned")]
    pub pinned: bool,

    /// Rest point within the pinned range.
    #[serde(default = "default_settle_ratio")]
    pub settle_ratio: f64,

    /// Choreography, in authoring order.
    #[serde(default)]
    pub keyframe: Vec<KeyframeConfig>,
}

/// One `[[section.keyframe]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyframeConfig {
    /// Animation target label.
    pub target: String,

    /// Tween start on the section's progress axis.
    pub at: f32,

    /// Tween end; omitted makes the keyframe an instantaneous step.
    #[serde(default)]
    pub until: Option<f32>,

    /// Ease name: `none`/`linear`, `power2.in`, `power2.out`,
    /// `power2.inout`, `smoothstep`. Defaults to `power2.out`.
    #[serde(default)]
    pub ease: Option<String>,

    /// State at span start.
    #[serde(default)]
    pub from: PatchConfig,

    /// State at span end.
    #[serde(default)]
    pub to: PatchConfig,
}

/// Sparse style fields, mirroring [`StylePatch`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchConfig {
    /// Opacity.
    pub opacity: Option<f32>,
    /// X translation.
    pub x: Option<f32>,
    /// Y translation.
    pub y: Option<f32>,
    /// Uniform scale.
    pub scale: Option<f32>,
    /// X rotation, degrees.
    pub rotate_x: Option<f32>,
    /// X-only scale.
    pub scale_x: Option<f32>,
}

fn default_span() -> f64 {
    1.0
}

fn default_pinned() -> bool {
    true
}

fn default_settle_ratio() -> f64 {
    scrollstage_core::registry::DEFAULT_SETTLE_RATIO
}

impl PatchConfig {
    /// Convert to the engine's patch type.
    #[must_use]
    pub fn to_patch(&self) -> StylePatch {
        StylePatch {
            opacity: self.opacity,
            x: self.x,
            y: self.y,
            scale: self.scale,
            rotate_x: self.rotate_x,
            scale_x: self.scale_x,
        }
    }
}

impl KeyframeConfig {
    /// Convert to an engine keyframe, validating span and ease.
    pub fn to_keyframe(&self, section: &str) -> Result<Keyframe, DeckError> {
        let span_ok = (0.0..=1.0).contains(&self.at)
            && self
                .until
                .is_none_or(|u| (0.0..=1.0).contains(&u) && u >= self.at);
        if !span_ok {
            return Err(DeckError::InvalidKeyframeSpan {
                section: section.to_string(),
                target: self.target.clone(),
            });
        }

        let easing = match self.ease.as_deref() {
            None => Easing::Power2Out,
            Some(name) => parse_ease(name).ok_or_else(|| DeckError::UnknownEase {
                section: section.to_string(),
                target: self.target.clone(),
                ease: name.to_string(),
            })?,
        };

        let mut kf = match self.until {
            Some(until) => Keyframe::tween(&self.target, self.at, until),
            None => Keyframe::step(&self.target, self.at),
        };
        kf = kf
            .from(self.from.to_patch())
            .to(self.to.to_patch())
            .easing(easing);
        Ok(kf)
    }
}

/// Map an authored ease name to a curve.
#[must_use]
pub fn parse_ease(name: &str) -> Option<Easing> {
    match name {
        "none" | "linear" => Some(Easing::Linear),
        "power2.in" => Some(Easing::Power2In),
        "power2.out" => Some(Easing::Power2Out),
        "power2.inout" => Some(Easing::Power2InOut),
        "smoothstep" => Some(Easing::Smoothstep),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_names() {
        assert_eq!(parse_ease("none"), Some(Easing::Linear));
        assert_eq!(parse_ease("linear"), Some(Easing::Linear));
        assert_eq!(parse_ease("power2.in"), Some(Easing::Power2In));
        assert_eq!(parse_ease("power2.out"), Some(Easing::Power2Out));
        assert_eq!(parse_ease("power2.inout"), Some(Easing::Power2InOut));
        assert_eq!(parse_ease("smoothstep"), Some(Easing::Smoothstep));
        assert_eq!(parse_ease("bounce"), None);
    }

    #[test]
    fn keyframe_conversion_defaults_to_ease_out() {
        let kf = KeyframeConfig {
            target: "headline".into(),
            at: 0.08,
            until: Some(0.30),
            ease: None,
            from: PatchConfig {
                opacity: Some(0.0),
                ..Default::default()
            },
            to: PatchConfig {
                opacity: Some(1.0),
                ..Default::default()
            },
        };
        let kf = kf.to_keyframe("thesis").unwrap();
        assert_eq!(kf.easing, Easing::Power2Out);
        assert_eq!(kf.span.start, 0.08);
        assert_eq!(kf.span.end, Some(0.30));
    }

    #[test]
    fn keyframe_span_outside_axis_is_rejected() {
        let kf = KeyframeConfig {
            target: "bg".into(),
            at: 0.9,
            until: Some(1.2),
            ease: None,
            from: PatchConfig::default(),
            to: PatchConfig::default(),
        };
        assert!(matches!(
            kf.to_keyframe("thesis"),
            Err(DeckError::InvalidKeyframeSpan { .. })
        ));
    }

    #[test]
    fn reversed_keyframe_span_is_rejected() {
        let kf = KeyframeConfig {
            target: "bg".into(),
            at: 0.5,
            until: Some(0.3),
            ease: None,
            from: PatchConfig::default(),
            to: PatchConfig::default(),
        };
        assert!(kf.to_keyframe("thesis").is_err());
    }

    #[test]
    fn unknown_ease_is_rejected() {
        let kf = KeyframeConfig {
            target: "bg".into(),
            at: 0.0,
            until: Some(0.2),
            ease: Some("elastic".into()),
            from: PatchConfig::default(),
            to: PatchConfig::default(),
        };
        assert!(matches!(
            kf.to_keyframe("thesis"),
            Err(DeckError::UnknownEase { .. })
        ));
    }
}
