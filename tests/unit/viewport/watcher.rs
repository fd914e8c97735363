use super::*;
use crate::MotionError;

/// Backend that accepts everything and remembers what is observed.
#[derive(Default)]
struct Recording {
    observed: Vec<ObservationHandle>,
    unobserved: Vec<ObservationHandle>,
}

impl IntersectionBackend for Recording {
    fn observe(
        &mut self,
        handle: ObservationHandle,
        _element: ElementId,
        _threshold: Threshold,
    ) -> MotionResult<()> {
        self.observed.push(handle);
        Ok(())
    }

    fn unobserve(&mut self, handle: ObservationHandle) {
        self.unobserved.push(handle);
    }
}

fn entry(handle: ObservationHandle, ratio: f64) -> IntersectionEntry {
    IntersectionEntry {
        handle,
        ratio,
        intersecting: ratio > 0.0,
    }
}

#[test]
fn attached_elements_start_hidden() {
    let mut w = ViewportWatcher::new(Recording::default());
    let h = w.attach(ElementId(1), Threshold::REVEAL);
    assert!(!w.is_visible(h));
    assert_eq!(w.backend().observed, vec![h]);
}

#[test]
fn visibility_follows_threshold_crossings() {
    let mut w = ViewportWatcher::new(Recording::default());
    let h = w.attach(ElementId(1), Threshold::COUNTER);
    let mut changes = Vec::new();

    w.deliver(&[entry(h, 0.2)], &mut changes);
    assert!(!w.is_visible(h));
    assert!(changes.is_empty());

    w.deliver(&[entry(h, 0.6)], &mut changes);
    assert!(w.is_visible(h));
    assert_eq!(
        changes,
        vec![VisibilityChange {
            handle: h,
            element: ElementId(1),
            visible: true
        }]
    );

    changes.clear();
    w.deliver(&[entry(h, 0.0)], &mut changes);
    assert!(!w.is_visible(h));
    assert_eq!(changes.len(), 1);
    assert!(!changes[0].visible);
}

#[test]
fn repeated_reports_do_not_emit_changes() {
    let mut w = ViewportWatcher::new(Recording::default());
    let h = w.attach(ElementId(1), Threshold::REVEAL);
    let mut changes = Vec::new();
    w.deliver(&[entry(h, 0.5), entry(h, 0.7), entry(h, 1.0)], &mut changes);
    assert_eq!(changes.len(), 1);
}

#[test]
fn unsupported_backend_fails_open() {
    let mut w = ViewportWatcher::new(Unsupported);
    let h = w.attach(ElementId(3), Threshold::REVEAL);
    assert!(w.is_visible(h));

    // Reports are ignored for fail-open elements.
    let mut changes = Vec::new();
    w.deliver(&[entry(h, 0.0)], &mut changes);
    assert!(w.is_visible(h));
    assert!(changes.is_empty());
}

#[test]
fn unsupported_backend_reports_capability_error() {
    let err = Unsupported
        .observe(ObservationHandle(1), ElementId(1), Threshold::REVEAL)
        .unwrap_err();
    assert!(matches!(err, MotionError::CapabilityUnavailable(_)));
}

#[test]
fn detach_is_idempotent_and_isolated() {
    let mut w = ViewportWatcher::new(Recording::default());
    let a = w.attach(ElementId(1), Threshold::REVEAL);
    let b = w.attach(ElementId(2), Threshold::REVEAL);
    let mut changes = Vec::new();
    w.deliver(&[entry(a, 1.0), entry(b, 1.0)], &mut changes);

    w.detach(a);
    w.detach(a);
    w.detach(ObservationHandle(999));

    assert!(!w.is_visible(a));
    assert!(w.is_visible(b));
    assert_eq!(w.len(), 1);
    assert_eq!(w.backend().unobserved, vec![a]);
}

#[test]
fn late_reports_for_detached_handles_are_dropped() {
    let mut w = ViewportWatcher::new(Recording::default());
    let h = w.attach(ElementId(1), Threshold::REVEAL);
    w.detach(h);

    let mut changes = Vec::new();
    w.deliver(&[entry(h, 1.0)], &mut changes);
    assert!(changes.is_empty());
    assert!(!w.is_visible(h));
}

#[test]
fn handles_are_not_reused() {
    let mut w = ViewportWatcher::new(Recording::default());
    let a = w.attach(ElementId(1), Threshold::REVEAL);
    w.detach(a);
    let b = w.attach(ElementId(1), Threshold::REVEAL);
    assert_ne!(a, b);
}
