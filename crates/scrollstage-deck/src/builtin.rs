#![forbid(unsafe_code)]

//! The built-in seven-section marketing deck.
//!
//! Section content that used to live as separately authored components is
//! collapsed here into data: each section is a span, a settle ratio, and a
//! keyframe list. Entrance choreography sits in the 0.00–0.30 band, exits
//! in 0.70–1.00, and the hold band between them is where every settle point
//! lands.

use std::time::Duration;

use scrollstage_core::{Easing, Keyframe, SectionTimeline, StylePatch};

use crate::deck::{Deck, DeckSection, IntroSpec};

/// Entrance: fade in while rising from `y` offset (vh units).
fn rise_in(target: &str, at: f32, until: f32, y: f32) -> Keyframe {
    Keyframe::tween(target, at, until)
        .from(StylePatch::new().opacity(0.0).y(y))
        .to(StylePatch::new().opacity(1.0).y(0.0))
        .easing(Easing::Power2Out)
}

/// Exit: fade out while drifting to `y` offset.
fn drift_out(target: &str, at: f32, until: f32, y: f32) -> Keyframe {
    Keyframe::tween(target, at, until)
        .from(StylePatch::new().opacity(1.0).y(0.0))
        .to(StylePatch::new().opacity(0.0).y(y))
        .easing(Easing::Power2In)
}

/// Background entrance: fade in while settling from a slight zoom.
fn bg_in(at: f32, until: f32) -> Keyframe {
    Keyframe::tween("bg", at, until)
        .from(StylePatch::new().opacity(0.0).scale(1.06))
        .to(StylePatch::new().opacity(1.0).scale(1.0))
        .easing(Easing::Linear)
}

/// Background exit: plain fade.
fn bg_out(at: f32, until: f32) -> Keyframe {
    Keyframe::tween("bg", at, until)
        .from(StylePatch::new().opacity(1.0))
        .to(StylePatch::new().opacity(0.0))
        .easing(Easing::Power2In)
}

/// Fade without movement.
fn fade(target: &str, at: f32, until: f32, from: f32, to: f32, easing: Easing) -> Keyframe {
    Keyframe::tween(target, at, until)
        .from(StylePatch::new().opacity(from))
        .to(StylePatch::new().opacity(to))
        .easing(easing)
}

fn hero() -> DeckSection {
    // Entrance happens on page load (see `intro`); scroll choreography is
    // exit-only: the wordmark zooms past the camera as the page leaves.
    let timeline = SectionTimeline::new()
        .with_keyframe(
            Keyframe::tween("wordmark", 0.70, 1.0)
                .from(StylePatch::new().scale(1.0).opacity(1.0))
                .to(StylePatch::new().scale(1.35).opacity(0.0))
                .easing(Easing::Power2In),
        )
        .with_keyframe(fade("micro", 0.72, 0.92, 1.0, 0.0, Easing::Power2In))
        .with_keyframe(fade("bottom_left", 0.74, 0.94, 1.0, 0.0, Easing::Power2In))
        .with_keyframe(fade("bottom_right", 0.74, 0.94, 1.0, 0.0, Easing::Power2In));
    DeckSection {
        name: "hero".into(),
        span: 1.3,
        pinned: true,
        settle_ratio: 0.5,
        timeline,
    }
}

fn thesis() -> DeckSection {
    let timeline = SectionTimeline::new()
        .with_keyframe(bg_in(0.0, 0.22))
        .with_keyframe(rise_in("label", 0.05, 0.18, -20.0))
        .with_keyframe(rise_in("headline", 0.08, 0.30, -40.0))
        .with_keyframe(rise_in("statement", 0.14, 0.34, 30.0))
        .with_keyframe(drift_out("headline", 0.75, 0.95, -10.0))
        .with_keyframe(drift_out("statement", 0.72, 0.92, 14.0))
        .with_keyframe(bg_out(0.78, 1.0))
        .with_keyframe(fade("label", 0.80, 0.95, 1.0, 0.0, Easing::Power2In));
    DeckSection {
        name: "thesis".into(),
        span: 1.5,
        pinned: true,
        settle_ratio: 0.5,
        timeline,
    }
}

fn mission() -> DeckSection {
    let mut timeline = SectionTimeline::new()
        .with_keyframe(bg_in(0.0, 0.22))
        .with_keyframe(rise_in("label", 0.05, 0.18, -20.0))
        .with_keyframe(rise_in("headline", 0.08, 0.30, -40.0));
    // Mission statement lines cascade in, then out.
    for i in 0..3u32 {
        let stagger = i as f32 * 0.04;
        timeline.push(rise_in(
            &format!("line_{i}"),
            0.16 + stagger,
            0.38 + stagger,
            24.0,
        ));
        timeline.push(drift_out(
            &format!("line_{i}"),
            0.72 + i as f32 * 0.02,
            0.90 + i as f32 * 0.02,
            12.0,
        ));
    }
    timeline.push(drift_out("headline", 0.75, 0.95, -10.0));
    timeline.push(bg_out(0.78, 1.0));
    timeline.push(fade("label", 0.80, 0.95, 1.0, 0.0, Easing::Power2In));
    DeckSection {
        name: "mission".into(),
        span: 1.5,
        pinned: true,
        settle_ratio: 0.5,
        timeline,
    }
}

fn atlas() -> DeckSection {
    let mut timeline = SectionTimeline::new()
        .with_keyframe(bg_in(0.0, 0.22))
        .with_keyframe(rise_in("label", 0.05, 0.18, -20.0))
        .with_keyframe(rise_in("headline", 0.08, 0.30, -40.0));
    // Three layer cards sweep up with a slight 3D tilt, each trailed by a
    // growing rule.
    for i in 0..3u32 {
        let stagger = i as f32 * 0.04;
        timeline.push(
            Keyframe::tween(&format!("card_{i}"), 0.18 + stagger, 0.42 + stagger)
                .from(StylePatch::new().opacity(0.0).y(60.0).rotate_x(8.0))
                .to(StylePatch::new().opacity(1.0).y(0.0).rotate_x(0.0))
                .easing(Easing::Power2Out),
        );
        timeline.push(
            Keyframe::tween(&format!("rule_{i}"), 0.24 + stagger, 0.40 + stagger)
                .from(StylePatch::new().scale_x(0.0))
                .to(StylePatch::new().scale_x(1.0))
                .easing(Easing::Power2Out),
        );
        timeline.push(
            Keyframe::tween(&format!("card_{i}"), 0.72 + i as f32 * 0.02, 0.90 + i as f32 * 0.02)
                .from(StylePatch::new().opacity(1.0).y(0.0))
                .to(StylePatch::new().opacity(0.0).y(18.0))
                .easing(Easing::Power2In),
        );
        timeline.push(
            Keyframe::tween(&format!("rule_{i}"), 0.85 + i as f32 * 0.02, 0.95 + i as f32 * 0.02)
                .from(StylePatch::new().scale_x(1.0))
                .to(StylePatch::new().scale_x(0.0))
                .easing(Easing::Power2In),
        );
    }
    timeline.push(drift_out("headline", 0.75, 0.95, -10.0));
    timeline.push(bg_out(0.78, 1.0));
    timeline.push(fade("label", 0.80, 0.95, 1.0, 0.0, Easing::Power2In));
    DeckSection {
        name: "atlas".into(),
        span: 1.5,
        pinned: true,
        // Rest point biased slightly past center so the cards sit fully
        // revealed when the page settles here.
        settle_ratio: 0.52,
        timeline,
    }
}

fn capabilities() -> DeckSection {
    let mut timeline = SectionTimeline::new()
        .with_keyframe(rise_in("label", 0.05, 0.18, -20.0))
        .with_keyframe(rise_in("headline", 0.08, 0.30, -40.0));
    for i in 0..4u32 {
        let stagger = i as f32 * 0.03;
        timeline.push(rise_in(&format!("item_{i}"), 0.18 + stagger, 0.40 + stagger, 36.0));
        timeline.push(drift_out(
            &format!("item_{i}"),
            0.72 + i as f32 * 0.02,
            0.90 + i as f32 * 0.02,
            12.0,
        ));
    }
    timeline.push(drift_out("headline", 0.75, 0.95, -10.0));
    timeline.push(fade("label", 0.80, 0.95, 1.0, 0.0, Easing::Power2In));
    DeckSection {
        name: "capabilities".into(),
        span: 1.5,
        pinned: true,
        settle_ratio: 0.5,
        timeline,
    }
}

fn frontier() -> DeckSection {
    let mut timeline = SectionTimeline::new()
        .with_keyframe(bg_in(0.0, 0.22))
        .with_keyframe(rise_in("label", 0.05, 0.18, -20.0))
        .with_keyframe(rise_in("headline", 0.08, 0.30, -40.0))
        .with_keyframe(rise_in("lede", 0.14, 0.34, 24.0));
    for i in 0..3u32 {
        let stagger = i as f32 * 0.04;
        timeline.push(rise_in(&format!("milestone_{i}"), 0.20 + stagger, 0.42 + stagger, 30.0));
        timeline.push(fade(
            &format!("milestone_{i}"),
            0.74 + i as f32 * 0.02,
            0.92 + i as f32 * 0.02,
            1.0,
            0.0,
            Easing::Power2In,
        ));
    }
    timeline.push(drift_out("headline", 0.75, 0.95, -10.0));
    timeline.push(fade("lede", 0.72, 0.92, 1.0, 0.0, Easing::Power2In));
    timeline.push(bg_out(0.78, 1.0));
    timeline.push(fade("label", 0.80, 0.95, 1.0, 0.0, Easing::Power2In));
    DeckSection {
        name: "frontier".into(),
        span: 1.2,
        pinned: true,
        settle_ratio: 0.5,
        timeline,
    }
}

fn contact() -> DeckSection {
    // Scrolls normally; its reveal is host-side and out of scope here.
    DeckSection {
        name: "contact".into(),
        span: 1.0,
        pinned: false,
        settle_ratio: 0.5,
        timeline: SectionTimeline::new(),
    }
}

/// The hero's one-shot entrance on initial page load.
fn intro() -> IntroSpec {
    let timeline = SectionTimeline::new()
        .with_keyframe(
            Keyframe::tween("wordmark", 0.0, 0.8)
                .from(StylePatch::new().opacity(0.0).scale(0.98))
                .to(StylePatch::new().opacity(1.0).scale(1.0))
                .easing(Easing::Power2Out),
        )
        .with_keyframe(rise_in("micro", 0.45, 0.85, 10.0))
        .with_keyframe(rise_in("bottom_left", 0.55, 0.95, 10.0))
        .with_keyframe(rise_in("bottom_right", 0.60, 1.0, 10.0));
    IntroSpec {
        timeline,
        duration: Duration::from_millis(1400),
    }
}

impl Deck {
    /// The built-in marketing presentation.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            sections: vec![
                hero(),
                thesis(),
                mission(),
                atlas(),
                capabilities(),
                frontier(),
                contact(),
            ],
            intro: Some(intro()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollstage_core::Band;

    #[test]
    fn builtin_deck_validates() {
        let deck = Deck::builtin();
        deck.validate().unwrap();
        assert_eq!(deck.sections.len(), 7);
        assert_eq!(deck.pinned_count(), 6);
        assert!(deck.intro.is_some());
    }

    #[test]
    fn atlas_settle_is_biased_late() {
        let deck = Deck::builtin();
        let atlas = deck.sections.iter().find(|s| s.name == "atlas").unwrap();
        assert!((atlas.settle_ratio - 0.52).abs() < 1e-12);
        // Every other pinned section rests at center.
        for s in deck.sections.iter().filter(|s| s.pinned && s.name != "atlas") {
            assert!((s.settle_ratio - 0.5).abs() < 1e-12, "{}", s.name);
        }
    }

    #[test]
    fn settle_points_land_in_hold_bands() {
        let deck = Deck::builtin();
        for s in deck.sections.iter().filter(|s| s.pinned) {
            assert_eq!(Band::at(s.settle_ratio as f32), Band::Hold, "{}", s.name);
        }
    }

    #[test]
    fn keyframe_spans_stay_on_axis() {
        let deck = Deck::builtin();
        for s in &deck.sections {
            let mut tl = s.timeline.clone();
            // Scrubbing the full axis exercises every span; nothing panics
            // and everything stays resolvable.
            for step in 0..=20 {
                tl.scrub(step as f32 / 20.0);
            }
        }
    }

    #[test]
    fn atlas_hold_band_is_fully_revealed() {
        let deck = Deck::builtin();
        let atlas = deck.sections.iter().find(|s| s.name == "atlas").unwrap();
        let mut tl = atlas.timeline.clone();
        tl.scrub(0.52);
        for target in ["bg", "label", "headline", "card_0", "card_1", "card_2"] {
            let s = tl.state_of(target).unwrap();
            assert!((s.opacity - 1.0).abs() < 1e-5, "{target} not fully visible");
            assert!(s.y.abs() < 1e-4, "{target} not at rest");
        }
        for rule in ["rule_0", "rule_1", "rule_2"] {
            assert!((tl.state_of(rule).unwrap().scale_x - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn hero_scroll_choreography_is_exit_only() {
        let deck = Deck::builtin();
        let hero = deck.sections.iter().find(|s| s.name == "hero").unwrap();
        let mut tl = hero.timeline.clone();
        // In the hold band the wordmark is untouched.
        tl.scrub(0.5);
        let s = tl.state_of("wordmark").unwrap();
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.scale, 1.0);
        // Fully exited: zoomed out and gone.
        tl.scrub(1.0);
        let s = tl.state_of("wordmark").unwrap();
        assert_eq!(s.opacity, 0.0);
        assert!((s.scale - 1.35).abs() < 1e-6);
    }

    #[test]
    fn intro_resolves_to_fully_visible() {
        let deck = Deck::builtin();
        let mut tl = deck.intro.unwrap().timeline;
        tl.scrub(1.0);
        for target in ["wordmark", "micro", "bottom_left", "bottom_right"] {
            assert_eq!(tl.state_of(target).unwrap().opacity, 1.0, "{target}");
        }
    }
}
