use super::*;

#[test]
fn threshold_rejects_out_of_range() {
    assert!(Threshold::new(-0.1).is_err());
    assert!(Threshold::new(1.01).is_err());
    assert!(Threshold::new(f64::NAN).is_err());
    assert!(Threshold::new(0.0).is_ok());
    assert!(Threshold::new(1.0).is_ok());
}

#[test]
fn threshold_zero_means_any_intersection() {
    let t = Threshold::new(0.0).unwrap();
    assert!(t.is_met(0.0, true));
    assert!(!t.is_met(0.0, false));
}

#[test]
fn threshold_compares_ratio_inclusively() {
    let t = Threshold::REVEAL;
    assert!(!t.is_met(0.09, true));
    assert!(t.is_met(0.1, true));
    assert!(t.is_met(1.0, true));
    assert!(!t.is_met(1.0, false));
}

#[test]
fn threshold_deserialize_validates() {
    let ok: Threshold = serde_json::from_str("0.5").unwrap();
    assert_eq!(ok, Threshold::COUNTER);
    assert!(serde_json::from_str::<Threshold>("2.0").is_err());
}

#[test]
fn element_id_displays_with_hash() {
    assert_eq!(ElementId(42).to_string(), "#42");
}
