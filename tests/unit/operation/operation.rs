use super::*;

use crate::foundation::core::AuthorityCode;
use crate::model::{CoordinateSystem, ReferenceSystemKind};
use crate::transform::GeocentricTranslation;

fn geocentric_system(name: &str, id: &str) -> Arc<ReferenceSystem> {
    Arc::new(
        ReferenceSystem::new(
            name,
            vec![AuthorityCode::parse(id).unwrap()],
            ReferenceSystemKind::Geocentric,
            CoordinateSystem::default_geocentric(),
            None,
            None,
        )
        .unwrap(),
    )
}

fn geographic_system(name: &str, id: &str) -> Arc<ReferenceSystem> {
    Arc::new(
        ReferenceSystem::new(
            name,
            vec![AuthorityCode::parse(id).unwrap()],
            ReferenceSystemKind::Geographic,
            CoordinateSystem::default_geographic(),
            None,
            None,
        )
        .unwrap(),
    )
}

#[test]
fn new_checks_dimensions_against_both_systems() {
    let shift = Transform::GeocentricTranslation(GeocentricTranslation::new(1.0, 2.0, 3.0));
    let a = geocentric_system("A", "T:1");
    let b = geocentric_system("B", "T:2");
    let flat = geographic_system("Flat", "T:3");

    assert!(Operation::new("ok", Arc::clone(&a), Arc::clone(&b), shift.clone(), None).is_ok());
    assert!(matches!(
        Operation::new("bad source", Arc::clone(&flat), b, shift.clone(), None),
        Err(TellusError::DimensionMismatch(_))
    ));
    assert!(matches!(
        Operation::new("bad target", a, flat, shift, None),
        Err(TellusError::DimensionMismatch(_))
    ));
}

#[test]
fn inverse_swaps_systems_and_transform() {
    let shift = Transform::GeocentricTranslation(GeocentricTranslation::new(1.0, 2.0, 3.0));
    let a = geocentric_system("A", "T:1");
    let b = geocentric_system("B", "T:2");

    let op = Operation::new("A to B", a, b, shift, Some("table".to_string())).unwrap();
    let inv = op.inverse().unwrap();

    assert_eq!(inv.name(), "Inverse of A to B");
    assert_eq!(inv.source().name(), "B");
    assert_eq!(inv.target().name(), "A");
    assert_eq!(inv.provenance(), Some("table"));
    assert_eq!(
        *inv.transform(),
        Transform::GeocentricTranslation(GeocentricTranslation::new(-1.0, -2.0, -3.0))
    );
}
