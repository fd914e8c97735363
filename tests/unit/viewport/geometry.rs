use super::*;
use crate::viewport::watcher::ViewportWatcher;

fn viewport_at(scroll_y: f64) -> Rect {
    Rect::new(0.0, scroll_y, 1000.0, scroll_y + 800.0)
}

#[test]
fn ratio_of_partially_visible_element() {
    let target = Rect::new(0.0, 700.0, 100.0, 900.0);
    let (ratio, intersecting) = intersection_ratio(target, viewport_at(0.0));
    assert!(intersecting);
    assert!((ratio - 0.5).abs() < 1e-9);
}

#[test]
fn disjoint_rects_do_not_intersect() {
    let target = Rect::new(0.0, 900.0, 100.0, 1000.0);
    assert_eq!(intersection_ratio(target, viewport_at(0.0)), (0.0, false));
}

#[test]
fn edge_contact_counts_as_intersecting_with_zero_ratio() {
    let target = Rect::new(0.0, 800.0, 100.0, 900.0);
    let (ratio, intersecting) = intersection_ratio(target, viewport_at(0.0));
    assert!(intersecting);
    assert_eq!(ratio, 0.0);
}

#[test]
fn zero_area_target_is_fully_visible_when_touching() {
    let target = Rect::new(10.0, 10.0, 10.0, 10.0);
    assert_eq!(intersection_ratio(target, viewport_at(0.0)), (1.0, true));
}

#[test]
fn reports_initial_state_then_only_crossings() {
    let mut g = GeometryIntersector::new();
    g.set_element_rect(ElementId(1), Rect::new(0.0, 1000.0, 100.0, 1200.0));
    g.observe(ObservationHandle(1), ElementId(1), Threshold::REVEAL)
        .unwrap();

    let mut out = Vec::new();
    g.compute(viewport_at(0.0), &mut out);
    assert_eq!(out.len(), 1);
    assert!(!out[0].intersecting);

    out.clear();
    g.compute(viewport_at(100.0), &mut out);
    assert!(out.is_empty());

    // 10% of 200px = 20px must be on screen.
    g.compute(viewport_at(220.0), &mut out);
    assert_eq!(out.len(), 1);
    assert!(out[0].ratio >= 0.1);
}

#[test]
fn elements_without_rects_are_skipped() {
    let mut g = GeometryIntersector::new();
    g.observe(ObservationHandle(1), ElementId(1), Threshold::REVEAL)
        .unwrap();
    let mut out = Vec::new();
    g.compute(viewport_at(0.0), &mut out);
    assert!(out.is_empty());
}

#[test]
fn drives_a_watcher_end_to_end() {
    let mut w = ViewportWatcher::new(GeometryIntersector::new());
    w.backend_mut()
        .set_element_rect(ElementId(5), Rect::new(0.0, 1500.0, 100.0, 1700.0));
    let h = w.attach(ElementId(5), Threshold::REVEAL);

    let mut entries = Vec::new();
    let mut changes = Vec::new();
    for y in [0.0, 400.0, 800.0] {
        entries.clear();
        w.backend_mut().compute(viewport_at(y), &mut entries);
        w.deliver(&entries, &mut changes);
    }
    assert!(w.is_visible(h));

    w.detach(h);
    assert_eq!(w.backend().observed_count(), 0);
}

#[test]
fn rect_is_dropped_with_its_last_observation() {
    let mut g = GeometryIntersector::new();
    g.set_element_rect(ElementId(1), Rect::new(0.0, 0.0, 10.0, 10.0));
    g.observe(ObservationHandle(1), ElementId(1), Threshold::REVEAL)
        .unwrap();
    g.observe(ObservationHandle(2), ElementId(1), Threshold::COUNTER)
        .unwrap();

    g.unobserve(ObservationHandle(1));
    assert_eq!(g.rect_count(), 1);
    g.unobserve(ObservationHandle(2));
    g.unobserve(ObservationHandle(2));
    assert_eq!(g.rect_count(), 0);
    assert_eq!(g.observed_count(), 0);

    g.set_element_rect(ElementId(2), Rect::new(0.0, 0.0, 10.0, 10.0));
    g.remove_element(ElementId(2));
    assert_eq!(g.rect_count(), 0);
}
