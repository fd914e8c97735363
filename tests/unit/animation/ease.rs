use super::*;

const ALL: [Ease; 4] = [Ease::Linear, Ease::OutQuad, Ease::OutCubic, Ease::CssEaseOut];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn out_curves_lead_linear() {
    for ease in [Ease::OutQuad, Ease::OutCubic, Ease::CssEaseOut] {
        assert!(ease.apply(0.3) > 0.3, "{ease:?}");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::CssEaseOut.apply(-3.0), 0.0);
    assert_eq!(Ease::CssEaseOut.apply(7.0), 1.0);
}

#[test]
fn linear_bezier_is_identity() {
    let b = CubicBezier {
        x1: 0.25,
        y1: 0.25,
        x2: 0.75,
        y2: 0.75,
    };
    for t in [0.1, 0.33, 0.5, 0.9] {
        assert!((b.apply(t) - t).abs() < 1e-5);
    }
}

#[test]
fn serde_names_are_snake_case() {
    let e: Ease = serde_json::from_str("\"css_ease_out\"").unwrap();
    assert_eq!(e, Ease::CssEaseOut);
    assert_eq!(Ease::default(), Ease::CssEaseOut);
}
