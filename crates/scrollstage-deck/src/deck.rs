#![forbid(unsafe_code)]

//! The deck: sections in page order, plus registration.

use std::time::Duration;

use scrollstage_core::{
    Band, PinnedRange, SectionId, SectionRegistry, SectionTimeline,
};

use crate::config::{DeckConfig, DeckError};

/// A load-time intro: a timeline played once on a clock before the first
/// scroll, with progress derived from elapsed time over `duration`.
#[derive(Debug, Clone)]
pub struct IntroSpec {
    /// The intro choreography.
    pub timeline: SectionTimeline,
    /// Total playback time.
    pub duration: Duration,
}

/// One section of the presentation, purely as data.
#[derive(Debug, Clone)]
pub struct DeckSection {
    /// Unique name; keys diagnostics and lookups.
    pub name: String,
    /// Layout/pin span in viewport heights.
    pub span: f64,
    /// Whether the section pins (and therefore snaps).
    pub pinned: bool,
    /// Rest point within the pinned range.
    pub settle_ratio: f64,
    /// Scroll-scrubbed choreography.
    pub timeline: SectionTimeline,
}

/// The whole presentation.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    /// Sections in page order.
    pub sections: Vec<DeckSection>,
    /// Optional load-time intro.
    pub intro: Option<IntroSpec>,
}

impl Deck {
    /// Parse and validate a TOML deck file.
    pub fn from_toml(input: &str) -> Result<Self, DeckError> {
        let config: DeckConfig = toml::from_str(input)?;

        let mut sections = Vec::with_capacity(config.section.len());
        for sc in &config.section {
            let mut timeline = SectionTimeline::new();
            for kc in &sc.keyframe {
                timeline.push(kc.to_keyframe(&sc.name)?);
            }
            sections.push(DeckSection {
                name: sc.name.clone(),
                span: sc.span,
                pinned: sc.pinned,
                settle_ratio: sc.settle_ratio,
                timeline,
            });
        }

        let deck = Self {
            sections,
            intro: None,
        };
        deck.validate()?;
        Ok(deck)
    }

    /// Check deck-level invariants: at least one section, unique names,
    /// positive spans, settle ratios in `[0, 1]`. A settle point outside
    /// its section's hold band is suspicious but legal — the correction
    /// would land on moving content — so it only warns.
    pub fn validate(&self) -> Result<(), DeckError> {
        if self.sections.is_empty() {
            return Err(DeckError::Empty);
        }
        for (i, s) in self.sections.iter().enumerate() {
            if self.sections[..i].iter().any(|other| other.name == s.name) {
                return Err(DeckError::DuplicateSection(s.name.clone()));
            }
            if !s.span.is_finite() || s.span <= 0.0 {
                return Err(DeckError::InvalidSpan {
                    name: s.name.clone(),
                    span: s.span,
                });
            }
            if !s.settle_ratio.is_finite() || !(0.0..=1.0).contains(&s.settle_ratio) {
                return Err(DeckError::InvalidSettleRatio {
                    name: s.name.clone(),
                    ratio: s.settle_ratio,
                });
            }
            if s.pinned && Band::at(s.settle_ratio as f32) != Band::Hold {
                tracing::warn!(
                    section = %s.name,
                    ratio = s.settle_ratio,
                    "settle point is outside the hold band"
                );
            }
        }
        Ok(())
    }

    /// Number of sections that will register a pinned range.
    #[must_use]
    pub fn pinned_count(&self) -> usize {
        self.sections.iter().filter(|s| s.pinned).count()
    }

    /// Total scrollable extent in pixels for a given viewport height:
    /// every section contributes its span.
    #[must_use]
    pub fn scroll_extent(&self, viewport_height: f64) -> f64 {
        self.sections
            .iter()
            .map(|s| s.span * viewport_height)
            .sum()
    }

    /// Register every pinned section, stacking pixel ranges in page order.
    ///
    /// Returns `(id, timeline)` pairs for the director. Sections the
    /// registry rejects are skipped — the registry has already logged why —
    /// and the rest of the deck registers normally.
    pub fn register_into(
        &self,
        registry: &mut SectionRegistry,
        viewport_height: f64,
    ) -> Vec<(SectionId, SectionTimeline)> {
        let mut bindings = Vec::with_capacity(self.pinned_count());
        let mut cursor = 0.0f64;
        for s in &self.sections {
            let height = s.span * viewport_height;
            if s.pinned {
                let range = PinnedRange::new(cursor, cursor + height);
                match registry.register(&s.name, range, s.settle_ratio) {
                    Ok(id) => bindings.push((id, s.timeline.clone())),
                    Err(_) => {
                        // Diagnostic already emitted; one fewer snap section.
                    }
                }
            }
            cursor += height;
        }
        bindings
    }
}
