use std::collections::BTreeMap;

use crate::foundation::core::{ElementId, ObservationHandle, Threshold};
use crate::foundation::error::MotionResult;

/// One intersection report, as delivered by the host's observation mechanism.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub handle: ObservationHandle,
    /// Visible fraction of the element's area, in `[0, 1]`.
    pub ratio: f64,
    pub intersecting: bool,
}

/// Emitted by [`ViewportWatcher::deliver`] whenever an element's `visible` flag flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityChange {
    pub handle: ObservationHandle,
    pub element: ElementId,
    pub visible: bool,
}

/// The viewport-intersection mechanism the watcher registers elements with.
///
/// Reports arrive asynchronously: the host collects them from the backend and hands them to
/// [`ViewportWatcher::deliver`]. `observe` returns `CapabilityUnavailable` when the host has no
/// way to observe intersections.
pub trait IntersectionBackend {
    fn observe(
        &mut self,
        handle: ObservationHandle,
        element: ElementId,
        threshold: Threshold,
    ) -> MotionResult<()>;

    fn unobserve(&mut self, handle: ObservationHandle);
}

/// Backend for hosts without intersection observation. Every element fails open.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unsupported;

impl IntersectionBackend for Unsupported {
    fn observe(
        &mut self,
        _handle: ObservationHandle,
        _element: ElementId,
        _threshold: Threshold,
    ) -> MotionResult<()> {
        Err(crate::MotionError::capability(
            "intersection observation is not supported by this host",
        ))
    }

    fn unobserve(&mut self, _handle: ObservationHandle) {}
}

#[derive(Clone, Copy, Debug)]
struct Observation {
    element: ElementId,
    threshold: Threshold,
    visible: bool,
    /// Backend refused the element; it stays visible and ignores reports.
    fail_open: bool,
}

/// Tracks whether attached elements currently intersect the viewport.
#[derive(Debug)]
pub struct ViewportWatcher<B> {
    backend: B,
    observations: BTreeMap<ObservationHandle, Observation>,
    next_handle: u64,
}

impl<B: IntersectionBackend> ViewportWatcher<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            observations: BTreeMap::new(),
            next_handle: 1,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Start observing `element`. Elements start hidden until the first report says otherwise,
    /// unless the backend cannot observe, in which case they are visible immediately.
    pub fn attach(&mut self, element: ElementId, threshold: Threshold) -> ObservationHandle {
        let handle = ObservationHandle(self.next_handle);
        self.next_handle += 1;

        let fail_open = match self.backend.observe(handle, element, threshold) {
            Ok(()) => false,
            Err(err) => {
                tracing::warn!(%element, error = %err, "viewport observation unavailable, showing element");
                true
            }
        };

        self.observations.insert(
            handle,
            Observation {
                element,
                threshold,
                visible: fail_open,
                fail_open,
            },
        );
        handle
    }

    /// Unknown or detached handles read as not visible.
    pub fn is_visible(&self, handle: ObservationHandle) -> bool {
        self.observations.get(&handle).is_some_and(|o| o.visible)
    }

    pub fn element(&self, handle: ObservationHandle) -> Option<ElementId> {
        self.observations.get(&handle).map(|o| o.element)
    }

    pub fn threshold(&self, handle: ObservationHandle) -> Option<Threshold> {
        self.observations.get(&handle).map(|o| o.threshold)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Stop observing. Detaching twice, or detaching a handle never issued, does nothing.
    pub fn detach(&mut self, handle: ObservationHandle) {
        if let Some(obs) = self.observations.remove(&handle) {
            if !obs.fail_open {
                self.backend.unobserve(handle);
            }
        }
    }

    /// Apply a batch of reports. Reports for detached handles are dropped, so a late delivery
    /// cannot resurrect an element.
    pub fn deliver(&mut self, entries: &[IntersectionEntry], out: &mut Vec<VisibilityChange>) {
        for entry in entries {
            let Some(obs) = self.observations.get_mut(&entry.handle) else {
                continue;
            };
            if obs.fail_open {
                continue;
            }
            let visible = obs.threshold.is_met(entry.ratio, entry.intersecting);
            if visible != obs.visible {
                obs.visible = visible;
                out.push(VisibilityChange {
                    handle: entry.handle,
                    element: obs.element,
                    visible,
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/watcher.rs"]
mod tests;
