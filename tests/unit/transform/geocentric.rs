use super::*;

#[test]
fn apply_adds_the_offsets() {
    let t = GeocentricTranslation::new(1.0, 2.0, 3.0);
    let mut dst = [0.0; 3];
    t.apply(&[100.0, 200.0, 300.0], &mut dst);
    assert_eq!(dst, [101.0, 202.0, 303.0]);
}

#[test]
fn inverse_negates_parameters() {
    let t = GeocentricTranslation::new(1.0, -2.0, 3.5);
    assert_eq!(t.inverse().parameters(), [-1.0, 2.0, -3.5]);
    assert_eq!(t.inverse().inverse(), t);
}

#[test]
fn parameters_reports_in_order() {
    assert_eq!(
        GeocentricTranslation::new(4.0, 5.0, 6.0).parameters(),
        [4.0, 5.0, 6.0]
    );
}
