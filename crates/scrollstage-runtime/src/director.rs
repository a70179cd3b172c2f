#![forbid(unsafe_code)]

//! The frame loop: scroll input → progress → scrubbing → settling.
//!
//! # Per-frame order
//!
//! 1. Apply a pending resize: cancel any in-flight corrective tween (it was
//!    computed against stale geometry), rebuild the snap resolver against
//!    the new extent.
//! 2. Consume pending scroll input — only the most recent offset observed
//!    since the last frame (last value wins).
//! 3. Advance the load-time intro, if one is playing.
//! 4. Advance the corrective tween, writing its sample to the viewport
//!    under the re-entrancy guard.
//! 5. Map the offset to every section's progress and scrub its timeline
//!    through the lag filter.
//! 6. Settle detection: after a quiet period with no user input, consult
//!    the resolver once and start a corrective glide if it asks for one.
//!
//! # Re-entrancy
//!
//! Writing the viewport makes the host emit a scroll event right back at
//! [`Director::on_scroll`]. Offsets that match the director's own last
//! write (within a small tolerance) are recognized as echoes and dropped;
//! anything else arriving mid-glide is the user grabbing the page, which
//! cancels the glide immediately.

use std::time::Duration;

use scrollstage_core::{
    PinnedRange, ScrollExtent, SectionId, SectionRegistry, SectionTimeline, SnapResolver,
    StyleState, section_progress,
};

use crate::intro::IntroPlayer;
use crate::tween::CorrectiveTween;
use crate::viewport::ScrollViewport;

/// Tuning knobs for the director.
#[derive(Debug, Clone)]
pub struct DirectorConfig {
    /// Frames without user scroll input before the resolver is consulted.
    /// At 60 fps the default (6) is about 100 ms of quiet.
    pub settle_quiet_frames: u32,

    /// Scrub lag in seconds: displayed progress approaches raw progress
    /// exponentially with this time constant. Zero disables smoothing.
    pub scrub_lag: f32,

    /// Pixel tolerance for recognizing the director's own viewport writes
    /// when they echo back through the scroll event stream.
    pub echo_tolerance: f64,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            settle_quiet_frames: 6,
            scrub_lag: 0.7,
            echo_tolerance: 1.0,
        }
    }
}

/// A pinned section under the director's control.
#[derive(Debug)]
struct ActiveSection {
    id: SectionId,
    name: String,
    /// Pixel scroll range, copied from the registry at attach time.
    range: PinnedRange,
    timeline: SectionTimeline,
    /// Lag-filtered progress actually delivered to the timeline.
    displayed: f32,
}

/// Owns the viewport seam, the registry, the resolver, and every section
/// timeline; the host's single entry point into the choreography engine.
#[derive(Debug)]
pub struct Director<V: ScrollViewport> {
    viewport: V,
    registry: SectionRegistry,
    resolver: SnapResolver,
    resolver_stale: bool,
    config: DirectorConfig,
    sections: Vec<ActiveSection>,

    /// Most recent offset observed at the start of the current frame.
    offset: f64,
    /// Latest unconsumed scroll input (last value wins).
    pending_offset: Option<f64>,
    pending_resize: bool,
    quiet_frames: u32,
    /// No corrections before the first real scroll: the page rests wherever
    /// it loaded.
    seen_input: bool,

    tween: Option<CorrectiveTween>,
    /// Re-entrancy guard: the last offset this director wrote itself.
    last_written: Option<f64>,

    intro: Option<IntroPlayer>,
}

impl<V: ScrollViewport> Director<V> {
    /// Build a director over an already-populated registry.
    ///
    /// `timelines` pairs registered section handles with their
    /// choreography. A timeline whose handle is not in the registry is
    /// skipped with a diagnostic — that section simply has no pinned
    /// choreography, the rest of the page is unaffected.
    #[must_use]
    pub fn new(
        viewport: V,
        registry: SectionRegistry,
        timelines: Vec<(SectionId, SectionTimeline)>,
    ) -> Self {
        let mut sections = Vec::with_capacity(timelines.len());
        for (id, timeline) in timelines {
            match registry.get(id) {
                Some(section) => sections.push(ActiveSection {
                    id,
                    name: section.name.clone(),
                    range: section.range,
                    timeline,
                    displayed: 0.0,
                }),
                None => {
                    tracing::warn!(?id, "skipping timeline for unregistered section");
                }
            }
        }
        // Keep frame iteration in page order.
        sections.sort_by(|a, b| a.range.start.total_cmp(&b.range.start));

        let offset = viewport.offset();
        let resolver = SnapResolver::build(&registry, ScrollExtent::new(viewport.extent()));
        let resolver_stale = !resolver.is_active();

        Self {
            viewport,
            registry,
            resolver,
            resolver_stale,
            config: DirectorConfig::default(),
            sections,
            offset,
            pending_offset: None,
            pending_resize: false,
            quiet_frames: 0,
            seen_input: false,
            tween: None,
            last_written: None,
            intro: None,
        }
    }

    /// Override the default tuning (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: DirectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a load-time intro, played from the first frame.
    #[must_use]
    pub fn with_intro(mut self, intro: IntroPlayer) -> Self {
        self.intro = Some(intro);
        self
    }

    // -- host event handlers ------------------------------------------------

    /// Record a scroll event. Cheap; real work happens in [`Self::frame`].
    pub fn on_scroll(&mut self, offset: f64) {
        if let Some(written) = self.last_written
            && (offset - written).abs() <= self.config.echo_tolerance
        {
            // Echo of our own corrective write.
            return;
        }
        if self.tween.take().is_some() {
            tracing::debug!(offset, "user input interrupted corrective scroll");
            self.last_written = None;
        }
        self.pending_offset = Some(offset);
        self.quiet_frames = 0;
        self.seen_input = true;
    }

    /// Record a resize. Handled at the start of the next frame.
    pub fn on_resize(&mut self) {
        self.pending_resize = true;
    }

    /// Host hook for explicit gesture-end events: skip the quiet period and
    /// consult the resolver on the next frame.
    pub fn settle_now(&mut self) {
        self.quiet_frames = self.config.settle_quiet_frames.saturating_sub(1);
        self.seen_input = true;
    }

    // -- frame loop ---------------------------------------------------------

    /// Advance one animation frame.
    pub fn frame(&mut self, dt: Duration) {
        if self.pending_resize {
            self.pending_resize = false;
            if self.tween.take().is_some() {
                tracing::debug!("resize cancelled in-flight corrective scroll");
            }
            self.last_written = None;
            self.rebuild_resolver();
        }

        // Late activation: the registry's readiness barrier may complete
        // after construction.
        if self.resolver_stale
            && self.registry.is_ready()
            && ScrollExtent::new(self.viewport.extent()).is_scrollable()
        {
            self.rebuild_resolver();
        }

        let user_input = self.pending_offset.is_some();
        if let Some(offset) = self.pending_offset.take() {
            self.offset = offset;
        }

        if let Some(intro) = &mut self.intro {
            intro.tick(dt);
            if intro.is_done() {
                tracing::debug!("load-time intro finished");
                self.intro = None;
            }
        }

        if let Some(tween) = &mut self.tween {
            let sample = tween.tick(dt);
            self.last_written = Some(sample);
            self.viewport.set_offset(sample);
            self.offset = self.viewport.offset();
            if tween.is_done() {
                tracing::debug!(offset = self.offset, "corrective scroll settled");
                self.tween = None;
            }
        }

        self.scrub_sections(dt);

        if self.tween.is_none() {
            if user_input {
                self.quiet_frames = 0;
            } else {
                self.quiet_frames = self.quiet_frames.saturating_add(1);
                if self.seen_input && self.quiet_frames == self.config.settle_quiet_frames {
                    self.consult_resolver();
                }
            }
        }
    }

    fn scrub_sections(&mut self, dt: Duration) {
        let alpha = if self.config.scrub_lag <= 0.0 {
            1.0
        } else {
            1.0 - (-dt.as_secs_f32() / self.config.scrub_lag).exp()
        };
        for section in &mut self.sections {
            let raw = section_progress(self.offset, &section.range);
            section.displayed += (raw - section.displayed) * alpha;
            section.timeline.scrub(section.displayed);
        }
    }

    fn consult_resolver(&mut self) {
        let extent = ScrollExtent::new(self.viewport.extent());
        let Some(value) = extent.normalize(self.offset) else {
            return;
        };
        if let Some(cmd) = self.resolver.resolve(value) {
            let target_px = extent.denormalize(cmd.target);
            tracing::debug!(
                from = self.offset,
                to = target_px,
                duration_ms = cmd.duration.as_millis() as u64,
                "starting corrective scroll"
            );
            self.tween = Some(CorrectiveTween::new(
                self.offset,
                target_px,
                cmd.duration,
                cmd.easing,
            ));
        }
    }

    fn rebuild_resolver(&mut self) {
        self.resolver =
            SnapResolver::build(&self.registry, ScrollExtent::new(self.viewport.extent()));
        self.resolver_stale = !self.resolver.is_active();
    }

    // -- queries ------------------------------------------------------------

    /// Offset the current frame is working with.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Whether a corrective glide is in flight.
    #[inline]
    #[must_use]
    pub fn is_correcting(&self) -> bool {
        self.tween.is_some()
    }

    /// Whether the load-time intro is still playing.
    #[inline]
    #[must_use]
    pub fn intro_playing(&self) -> bool {
        self.intro.is_some()
    }

    /// The registry (e.g. for readiness queries).
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Mutable registry access for late registration or teardown. Call
    /// [`Self::on_resize`] afterwards so the resolver is rebuilt against
    /// the changed membership.
    pub fn registry_mut(&mut self) -> &mut SectionRegistry {
        &mut self.registry
    }

    /// The viewport seam.
    #[inline]
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Lag-filtered progress of a section, by name.
    #[must_use]
    pub fn section_progress_of(&self, name: &str) -> Option<f32> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.displayed)
    }

    /// Resolved style of `target` within `section` after the latest scrub.
    #[must_use]
    pub fn style_of(&self, section: &str, target: &str) -> Option<StyleState> {
        self.sections
            .iter()
            .find(|s| s.name == section)
            .and_then(|s| s.timeline.state_of(target))
    }

    /// Iterate sections in page order as `(name, displayed progress)`.
    pub fn section_progresses(&self) -> impl Iterator<Item = (&str, f32)> {
        self.sections.iter().map(|s| (s.name.as_str(), s.displayed))
    }
}
