//! Host-side composition of the motion primitives for one page view.
//!
//! The host forwards its three event streams (scroll, intersection reports, rendering frames)
//! and reads back [`ElementView`]s to paint. All calls happen on one thread, one at a time.

use std::collections::BTreeMap;

use crate::config::MotionConfig;
use crate::counter::animation::{CounterAnimation, CounterLabel};
use crate::counter::frames::{AnimationId, FrameQueue, FrameScheduler};
use crate::foundation::core::{ElementId, Millis, ObservationHandle, Rect, Threshold, Vec2};
use crate::foundation::error::{MotionError, MotionResult};
use crate::media::video::VideoBackground;
use crate::page::manifest::{MotionSpec, PageManifest};
use crate::reveal::transition::{
    RevealState, RevealTiming, RevealTransition, RevealVariant, VisualState,
};
use crate::scroll::parallax::ParallaxElement;
use crate::scroll::sections::{ScrollSectionTracker, Section};
use crate::scroll::state::{ScrollSnapshot, ScrollState};
use crate::viewport::geometry::GeometryIntersector;
use crate::viewport::watcher::{
    IntersectionBackend, IntersectionEntry, ViewportWatcher, VisibilityChange,
};

#[derive(Debug)]
enum Behavior {
    Reveal(RevealTransition),
    Counter {
        anim: CounterAnimation,
        label: CounterLabel,
    },
    Parallax(ParallaxElement),
}

#[derive(Debug)]
struct Mounted {
    handle: Option<ObservationHandle>,
    behavior: Behavior,
}

/// Paint-ready state of one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ElementView {
    Reveal {
        state: RevealState,
        visual: VisualState,
    },
    Counter {
        value: i64,
        text: String,
        done: bool,
    },
    Parallax {
        translate: Vec2,
    },
}

#[derive(Debug)]
pub struct PageRuntime<B> {
    config: MotionConfig,
    scroll: ScrollState,
    tracker: ScrollSectionTracker,
    watcher: ViewportWatcher<B>,
    frames: FrameQueue,
    elements: BTreeMap<ElementId, Mounted>,
    now: Millis,
    changes: Vec<VisibilityChange>,
    due: Vec<AnimationId>,
    video: Option<VideoBackground>,
}

impl<B: IntersectionBackend> PageRuntime<B> {
    pub fn new(config: MotionConfig, backend: B) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            tracker: ScrollSectionTracker::with_lookahead(config.lookahead_px),
            config,
            scroll: ScrollState::new(),
            watcher: ViewportWatcher::new(backend),
            frames: FrameQueue::new(),
            elements: BTreeMap::new(),
            now: 0.0,
            changes: Vec::new(),
            due: Vec::new(),
            video: None,
        })
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn watcher(&self) -> &ViewportWatcher<B> {
        &self.watcher
    }

    pub fn register_sections(&mut self, sections: Vec<Section>) -> MotionResult<()> {
        self.tracker.register_sections(sections)?;
        let y = self.scroll.snapshot().scroll_y;
        self.tracker.update(y);
        Ok(())
    }

    pub fn mount_reveal(
        &mut self,
        id: ElementId,
        variant: RevealVariant,
        delay_ms: u32,
    ) -> MotionResult<()> {
        let timing = RevealTiming {
            duration_ms: self.config.transition_ms,
            ..RevealTiming::default()
        };
        let threshold = self.config.reveal_threshold;
        self.mount(
            id,
            Some(threshold),
            Behavior::Reveal(RevealTransition::with_timing(variant, delay_ms, timing)),
        )
    }

    pub fn mount_counter(
        &mut self,
        id: ElementId,
        end: i64,
        duration_ms: Option<i64>,
        label: CounterLabel,
    ) -> MotionResult<()> {
        let anim = CounterAnimation::new(
            end,
            duration_ms.unwrap_or(self.config.counter_duration_ms),
        )?;
        let threshold = self.config.counter_threshold;
        self.mount(id, Some(threshold), Behavior::Counter { anim, label })
    }

    pub fn mount_parallax(&mut self, id: ElementId, speed: Option<f64>) -> MotionResult<()> {
        let speed = speed.unwrap_or(self.config.parallax_speed);
        if !speed.is_finite() {
            return Err(MotionError::invalid("parallax speed must be finite"));
        }
        // Parallax follows the scroll position directly; no viewport observation needed.
        self.mount(id, None, Behavior::Parallax(ParallaxElement::new(speed)))
    }

    fn mount(
        &mut self,
        id: ElementId,
        observe: Option<Threshold>,
        behavior: Behavior,
    ) -> MotionResult<()> {
        if self.elements.contains_key(&id) {
            return Err(MotionError::invalid(format!("element {id} is already mounted")));
        }
        let handle = observe.map(|threshold| self.watcher.attach(id, threshold));
        self.elements.insert(id, Mounted { handle, behavior });

        // Fail-open elements are visible from the start and never get a report.
        if let Some(h) = handle {
            if self.watcher.is_visible(h) {
                self.apply_visibility(id, true);
            }
        }
        Ok(())
    }

    /// Tear an element down: stop observing it and drop any pending frame. Unknown ids are
    /// ignored, so unmounting twice is harmless.
    pub fn unmount(&mut self, id: ElementId) {
        let Some(mut mounted) = self.elements.remove(&id) else {
            return;
        };
        if let Some(h) = mounted.handle {
            self.watcher.detach(h);
        }
        if let Behavior::Counter { anim, .. } = &mut mounted.behavior {
            anim.stop();
            self.frames.cancel_frame(AnimationId(id.0));
        }
    }

    pub fn is_mounted(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Scroll handler. The only writer of the page's scroll state.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn on_scroll(&mut self, raw_y: f64) -> ScrollSnapshot {
        let snap = self.scroll.handle_scroll_event(raw_y);
        self.tracker.update(snap.scroll_y);
        snap
    }

    pub fn scroll(&self) -> ScrollSnapshot {
        self.scroll.snapshot()
    }

    pub fn active_section(&self) -> Option<&str> {
        self.tracker.active_id()
    }

    pub fn scroll_target(&self, section: &str) -> Option<i64> {
        self.tracker.scroll_target(section)
    }

    #[tracing::instrument(level = "trace", skip(self, entries), fields(n = entries.len()))]
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) {
        let mut changes = std::mem::take(&mut self.changes);
        changes.clear();
        self.watcher.deliver(entries, &mut changes);
        for change in &changes {
            self.apply_visibility(change.element, change.visible);
        }
        self.changes = changes;
    }

    fn apply_visibility(&mut self, id: ElementId, visible: bool) {
        let Some(mounted) = self.elements.get_mut(&id) else {
            return;
        };
        match &mut mounted.behavior {
            // The presentation clock starts on the next frame, not at a possibly stale `now`.
            Behavior::Reveal(r) => {
                r.compute(visible);
            }
            Behavior::Counter { anim, .. } => {
                if anim.on_visibility(visible) {
                    self.frames.request_frame(AnimationId(id.0));
                }
            }
            Behavior::Parallax(_) => {}
        }
    }

    /// Rendering-frame callback. Starts the clock of reveals latched since the last frame and
    /// advances every counter that asked for this frame.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn on_frame(&mut self, now: Millis) {
        self.now = now;
        for mounted in self.elements.values_mut() {
            if let Behavior::Reveal(r) = &mut mounted.behavior {
                r.start_clock(now);
            }
        }

        let mut due = std::mem::take(&mut self.due);
        self.frames.take_due(&mut due);
        for &anim_id in &due {
            let Some(mounted) = self.elements.get_mut(&ElementId(anim_id.0)) else {
                continue;
            };
            if let Behavior::Counter { anim, .. } = &mut mounted.behavior {
                anim.tick(now);
                if anim.is_running() {
                    self.frames.request_frame(anim_id);
                }
            }
        }
        self.due = due;
    }

    /// `true` while some counter still wants frames or some latched reveal has not settled.
    pub fn wants_frame(&self) -> bool {
        !self.frames.is_idle()
            || self.elements.values().any(|m| match &m.behavior {
                Behavior::Reveal(r) => r.entered() && !r.is_settled(self.now),
                _ => false,
            })
    }

    /// Current paint state, sampled at the last frame time.
    pub fn element_view(&mut self, id: ElementId) -> MotionResult<ElementView> {
        let now = self.now;
        let scroll = self.scroll.snapshot();
        let mounted = self
            .elements
            .get_mut(&id)
            .ok_or(MotionError::UnknownElement(id))?;
        Ok(match &mut mounted.behavior {
            Behavior::Reveal(r) => {
                let state = r.state();
                let visual = if r.is_started() {
                    r.sample(now)
                } else {
                    state.variant.hidden()
                };
                ElementView::Reveal { state, visual }
            }
            Behavior::Counter { anim, label } => ElementView::Counter {
                value: anim.current(),
                text: label.format(anim.current()),
                done: anim.is_done(),
            },
            Behavior::Parallax(p) => ElementView::Parallax {
                translate: p.translate(scroll),
            },
        })
    }

    pub fn set_video(&mut self, video: VideoBackground) {
        self.video = Some(video);
    }

    /// Hero background video, if the page has one.
    pub fn video(&self) -> Option<&VideoBackground> {
        self.video.as_ref()
    }

    pub fn video_mut(&mut self) -> Option<&mut VideoBackground> {
        self.video.as_mut()
    }

    pub fn element_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.keys().copied()
    }
}

impl PageRuntime<GeometryIntersector> {
    /// Build a runtime for a manifest, with intersections derived from element rectangles.
    pub fn from_manifest(manifest: &PageManifest) -> MotionResult<Self> {
        manifest.validate()?;
        let mut rt = Self::new(manifest.config.clone(), GeometryIntersector::new())?;
        rt.register_sections(manifest.sections.clone())?;
        if let Some(opts) = &manifest.video {
            rt.set_video(VideoBackground::new(opts.clone()));
        }

        for el in &manifest.elements {
            // Parallax layers are never observed, so their rects would only be dead weight.
            let observed = !matches!(el.motion, MotionSpec::Parallax(_));
            if observed && let Some(rect) = el.rect {
                rt.set_element_rect(el.id, rect);
            }
            match &el.motion {
                MotionSpec::Reveal { variant, delay_ms } => {
                    rt.mount_reveal(el.id, *variant, *delay_ms)?
                }
                MotionSpec::Counter {
                    end,
                    duration_ms,
                    prefix,
                    suffix,
                } => rt.mount_counter(
                    el.id,
                    *end,
                    *duration_ms,
                    CounterLabel {
                        prefix: prefix.clone(),
                        suffix: suffix.clone(),
                    },
                )?,
                MotionSpec::Parallax(p) => rt.mount_parallax(el.id, Some(p.speed))?,
            }
        }
        Ok(rt)
    }

    pub fn set_element_rect(&mut self, id: ElementId, rect: Rect) {
        self.watcher.backend_mut().set_element_rect(id, rect);
    }

    /// Recompute intersections for `viewport` (page coordinates) and apply the resulting reports.
    pub fn on_viewport_geometry(&mut self, viewport: Rect) {
        let mut entries = Vec::new();
        self.watcher.backend_mut().compute(viewport, &mut entries);
        self.on_intersections(&entries);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/runtime.rs"]
mod tests;
