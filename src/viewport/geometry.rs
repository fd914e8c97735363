//! Intersection backend driven by plain rectangles.
//!
//! Hosts that already know element layout (or tests, or the CLI) feed element rectangles and the
//! current viewport rectangle in page coordinates. Reports are produced the way a browser
//! intersection observer produces them: once after `observe`, then only when the element crosses
//! its threshold.

use std::collections::{BTreeMap, HashMap};

use crate::foundation::core::{ElementId, ObservationHandle, Rect, Threshold};
use crate::foundation::error::MotionResult;
use crate::viewport::watcher::{IntersectionBackend, IntersectionEntry};

#[derive(Clone, Copy, Debug)]
struct Target {
    element: ElementId,
    threshold: Threshold,
    /// Last reported threshold state, `None` until the initial report.
    last_met: Option<bool>,
}

#[derive(Debug, Default)]
pub struct GeometryIntersector {
    rects: HashMap<ElementId, Rect>,
    targets: BTreeMap<ObservationHandle, Target>,
}

impl GeometryIntersector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_element_rect(&mut self, element: ElementId, rect: Rect) {
        self.rects.insert(element, rect);
    }

    pub fn remove_element(&mut self, element: ElementId) {
        self.rects.remove(&element);
    }

    pub fn observed_count(&self) -> usize {
        self.targets.len()
    }

    pub fn rect_count(&self) -> usize {
        self.rects.len()
    }

    /// Recompute every observed element against `viewport` and append reports for the ones
    /// that crossed their threshold (or have never been reported).
    pub fn compute(&mut self, viewport: Rect, out: &mut Vec<IntersectionEntry>) {
        for (&handle, target) in self.targets.iter_mut() {
            let Some(rect) = self.rects.get(&target.element) else {
                continue;
            };
            let (ratio, intersecting) = intersection_ratio(*rect, viewport);
            let met = target.threshold.is_met(ratio, intersecting);
            if target.last_met != Some(met) {
                target.last_met = Some(met);
                out.push(IntersectionEntry {
                    handle,
                    ratio,
                    intersecting,
                });
            }
        }
    }
}

impl IntersectionBackend for GeometryIntersector {
    fn observe(
        &mut self,
        handle: ObservationHandle,
        element: ElementId,
        threshold: Threshold,
    ) -> MotionResult<()> {
        self.targets.insert(
            handle,
            Target {
                element,
                threshold,
                last_met: None,
            },
        );
        Ok(())
    }

    /// Stops reporting `handle`. The element's rect goes with its last observation, so it has to
    /// be set again before observing the element anew.
    fn unobserve(&mut self, handle: ObservationHandle) {
        let Some(target) = self.targets.remove(&handle) else {
            return;
        };
        if !self.targets.values().any(|t| t.element == target.element) {
            self.rects.remove(&target.element);
        }
    }
}

/// Fraction of `target` inside `viewport`, and whether the two touch at all (edges included).
/// A zero-area target counts as fully visible while it touches the viewport.
pub fn intersection_ratio(target: Rect, viewport: Rect) -> (f64, bool) {
    let target = target.abs();
    let viewport = viewport.abs();
    let w = target.x1.min(viewport.x1) - target.x0.max(viewport.x0);
    let h = target.y1.min(viewport.y1) - target.y0.max(viewport.y0);
    if w < 0.0 || h < 0.0 {
        return (0.0, false);
    }

    let area = target.area();
    if area <= 0.0 {
        return (1.0, true);
    }
    ((w * h / area).clamp(0.0, 1.0), true)
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/geometry.rs"]
mod tests;
