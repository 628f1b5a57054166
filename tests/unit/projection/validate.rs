use super::*;

fn with(key: ParamKey, v: f64) -> ProjectionParams {
    let mut p = ProjectionParams::default();
    p.set_value(key, v);
    p
}

#[test]
fn defaults_are_clean() {
    assert!(validate_params(&ProjectionParams::default()).is_clean());
}

#[test]
fn d_bands() {
    let r = validate_params(&with(ParamKey::D, 0.4));
    assert!(r.dangers.contains_key(&ParamKey::D));
    assert!(!r.warnings.contains_key(&ParamKey::D));

    let r = validate_params(&with(ParamKey::D, 1.0));
    assert!(r.warnings.contains_key(&ParamKey::D));
    assert!(!r.dangers.contains_key(&ParamKey::D));

    let r = validate_params(&with(ParamKey::D, 5.0));
    assert_eq!(r.severity(ParamKey::D), Severity::Safe);
}

#[test]
fn d_band_edges_are_exclusive() {
    assert_eq!(
        validate_params(&with(ParamKey::D, 0.5)).severity(ParamKey::D),
        Severity::Warning
    );
    assert_eq!(
        validate_params(&with(ParamKey::D, 1.5)).severity(ParamKey::D),
        Severity::Safe
    );
}

#[test]
fn shear_axes_are_checked_independently() {
    let mut p = with(ParamKey::A, -1.6);
    let r = validate_params(&p);
    assert_eq!(r.reason(ParamKey::A), Some("high w-blend may distort"));
    assert_eq!(r.severity(ParamKey::B), Severity::Safe);

    p.set_value(ParamKey::B, 1.51);
    let r = validate_params(&p);
    assert_eq!(r.severity(ParamKey::A), Severity::Warning);
    assert_eq!(r.severity(ParamKey::B), Severity::Warning);
}

#[test]
fn radius_and_offset() {
    let r = validate_params(&with(ParamKey::R, 0.9));
    assert_eq!(r.reason(ParamKey::R), Some("stereographic radius too small"));
    assert!(r.has_dangers());

    let r = validate_params(&with(ParamKey::C, -10.5));
    assert_eq!(r.reason(ParamKey::C), Some("large negative offset"));
    assert!(!r.has_dangers());

    assert!(validate_params(&with(ParamKey::C, -10.0)).is_clean());
}

#[test]
fn non_finite_values_do_not_panic() {
    let r = validate_params(&with(ParamKey::D, f64::NAN));
    assert_eq!(r.severity(ParamKey::D), Severity::Safe);
    let r = validate_params(&with(ParamKey::A, f64::INFINITY));
    assert_eq!(r.severity(ParamKey::A), Severity::Warning);
    let r = validate_params(&with(ParamKey::R, f64::NEG_INFINITY));
    assert_eq!(r.severity(ParamKey::R), Severity::Danger);
}

#[test]
fn report_serializes_with_document_keys() {
    let r = validate_params(&with(ParamKey::R, 0.5));
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["dangers"]["R"], "stereographic radius too small");
}
