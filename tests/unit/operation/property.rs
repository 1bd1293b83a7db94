use super::*;

use crate::operation::registry::OperationRegistry;

const CRS_TABLE: &str = r#"
1234 = GEOCCS["Test geocentric", DATUM["Test Datum 1934", TOWGS84[1, 2, 3]]]
1236 = FITTED_CS["Test local offset", GEOCTRANS[10, 20, 30], BASECRS["TEST:1234"]]
"#;

const EPSG_TABLE: &str = r#"
4978 = GEOCCS["WGS 84 (geocentric)", DATUM["World Geodetic System 1984"]]
"#;

const OP_TABLE: &str = r#"
# One stored direction is enough; the reverse is derived.
TEST:1234->EPSG:4978 = {"kind": "geocentric_translation", "params": {"dx": 1.0, "dy": 2.0, "dz": 3.0}}
TEST:1234->TEST:666 = {"kind": "geocentric_translation", "params": {"dx": "oops"}}
not a pair = {"kind": "identity", "params": {"dim": 3}}
"#;

fn authorities() -> Arc<AuthorityRegistry> {
    let registry = AuthorityRegistry::new();
    registry.add_provider(Arc::new(
        crate::authority::PropertyAuthorityFactory::from_str("TEST", 0, CRS_TABLE).unwrap(),
    ));
    registry.add_provider(Arc::new(
        crate::authority::PropertyAuthorityFactory::from_str("EPSG", 0, EPSG_TABLE).unwrap(),
    ));
    Arc::new(registry)
}

fn setup() -> (Arc<AuthorityRegistry>, Arc<PropertyOperationFactory>, OperationRegistry) {
    let authorities = authorities();
    let factory = Arc::new(
        PropertyOperationFactory::from_str("table", 0, Arc::clone(&authorities), OP_TABLE)
            .unwrap(),
    );
    let registry = OperationRegistry::new();
    registry.add_provider(Arc::clone(&factory) as Arc<dyn CoordinateOperationFactory>);
    (authorities, factory, registry)
}

#[test]
fn from_str_skips_unparseable_keys_but_keeps_bad_records() {
    let (_, factory, _) = setup();
    // The well-keyed entries survive, including the one whose record is
    // malformed; the line whose key is not a pair does not.
    assert_eq!(factory.len(), 2);
}

#[test]
fn equivalent_systems_get_the_identity() {
    let (authorities, factory, registry) = setup();
    let a = authorities.decode("TEST:1234").unwrap();
    let lookup = OperationLookup::new(&registry, 0);

    let op = factory.create_operation(&a, &a, &lookup).unwrap();
    assert!(op.transform().is_identity());
    assert_eq!(op.provenance(), Some("table"));
}

#[test]
fn direct_entries_resolve_to_the_stored_transform() {
    let (authorities, factory, registry) = setup();
    let source = authorities.decode("TEST:1234").unwrap();
    let target = authorities.decode("EPSG:4978").unwrap();
    let lookup = OperationLookup::new(&registry, 0);

    let op = factory.create_operation(&source, &target, &lookup).unwrap();
    assert_eq!(
        *op.transform(),
        Transform::GeocentricTranslation(GeocentricTranslation::new(1.0, 2.0, 3.0))
    );
    assert_eq!(op.source().name(), "Test geocentric");
    assert_eq!(op.target().name(), "WGS 84 (geocentric)");
}

#[test]
fn reverse_pairs_invert_the_stored_transform() {
    let (authorities, factory, registry) = setup();
    let source = authorities.decode("EPSG:4978").unwrap();
    let target = authorities.decode("TEST:1234").unwrap();
    let lookup = OperationLookup::new(&registry, 0);

    let op = factory.create_operation(&source, &target, &lookup).unwrap();
    assert_eq!(
        *op.transform(),
        Transform::GeocentricTranslation(GeocentricTranslation::new(-1.0, -2.0, -3.0))
    );
}

#[test]
fn malformed_records_surface_as_backing_store_failures() {
    let (authorities, factory, registry) = setup();
    let source = authorities.decode("TEST:1234").unwrap();
    let target = Arc::new(
        crate::model::parse_reference_system(r#"GEOCCS["Unrelated", DATUM["D666"]]"#).unwrap(),
    );
    let mut named = (*target).clone();
    named.ensure_identifier(AuthorityCode::parse("TEST:666").unwrap());
    let target = Arc::new(named);
    let lookup = OperationLookup::new(&registry, 0);

    let err = factory
        .create_operation(&source, &target, &lookup)
        .unwrap_err();
    assert!(matches!(err, TellusError::BackingStore(_)));
}

#[test]
fn fitted_sources_route_through_their_base_system() {
    let (authorities, factory, registry) = setup();
    let source = authorities.decode("TEST:1236").unwrap();
    let target = authorities.decode("EPSG:4978").unwrap();
    let lookup = OperationLookup::new(&registry, 0);

    let op = factory.create_operation(&source, &target, &lookup).unwrap();
    let steps = op.transform().steps();
    assert_eq!(steps.len(), 2);
    assert_eq!(
        steps[0],
        Transform::GeocentricTranslation(GeocentricTranslation::new(10.0, 20.0, 30.0))
    );
    assert_eq!(
        steps[1],
        Transform::GeocentricTranslation(GeocentricTranslation::new(1.0, 2.0, 3.0))
    );
    assert_eq!(
        op.transform().apply(&[0.0, 0.0, 0.0]).unwrap(),
        vec![11.0, 22.0, 33.0]
    );
}

#[test]
fn fitted_targets_are_reached_by_inversion() {
    let (authorities, factory, registry) = setup();
    let source = authorities.decode("EPSG:4978").unwrap();
    let target = authorities.decode("TEST:1236").unwrap();
    let lookup = OperationLookup::new(&registry, 0);

    let op = factory.create_operation(&source, &target, &lookup).unwrap();
    assert_eq!(
        op.transform().apply(&[11.0, 22.0, 33.0]).unwrap(),
        vec![0.0, 0.0, 0.0]
    );
}

#[test]
fn unrelated_pairs_are_not_found() {
    let (authorities, factory, registry) = setup();
    let source = authorities.decode("EPSG:4978").unwrap();
    let target = Arc::new(
        crate::model::parse_reference_system(r#"GEOCCS["Nowhere", DATUM["D0"]]"#).unwrap(),
    );
    let lookup = OperationLookup::new(&registry, 0);

    let err = factory
        .create_operation(&source, &target, &lookup)
        .unwrap_err();
    assert!(matches!(err, TellusError::OperationNotFound(_)));
}

#[test]
fn transform_records_cover_the_known_kinds() {
    let identity =
        parse_transform_kind_params("identity", &serde_json::json!({"dim": 3})).unwrap();
    assert_eq!(identity, Transform::Identity { dim: 3 });

    let shift = parse_transform_kind_params(
        "geocentric_translation",
        &serde_json::json!({"dx": 4.0, "dy": 5.0, "dz": 6.0}),
    )
    .unwrap();
    assert_eq!(
        shift,
        Transform::GeocentricTranslation(GeocentricTranslation::new(4.0, 5.0, 6.0))
    );

    let affine = parse_transform_kind_params(
        "affine",
        &serde_json::json!({
            "dim": 2,
            "matrix": [1.0, 0.0, 7.0, 0.0, 1.0, 8.0, 0.0, 0.0, 1.0],
        }),
    )
    .unwrap();
    assert_eq!(affine.apply(&[1.0, 1.0]).unwrap(), vec![8.0, 9.0]);
}

#[test]
fn transform_records_reject_bad_parameters() {
    assert!(parse_transform_kind_params("identity", &serde_json::json!({"dim": 0})).is_err());
    assert!(parse_transform_kind_params("identity", &serde_json::json!({})).is_err());
    assert!(
        parse_transform_kind_params(
            "geocentric_translation",
            &serde_json::json!({"dx": 1.0, "dy": 2.0})
        )
        .is_err()
    );
    assert!(parse_transform_kind_params("warp", &serde_json::json!({})).is_err());
    assert!(
        parse_transform_kind_params(
            "affine",
            &serde_json::json!({"dim": 2, "matrix": [1.0, 2.0]})
        )
        .is_err()
    );
}
