use super::*;

const TABLE: &str = r#"
# Core definitions.
4326 = GEOGCS["WGS 84", DATUM["WGS_1984", TOWGS84[0, 0, 0]], UNIT["degree", 0.0174532925199433]]
TEST:32633 = PROJCS["UTM zone 33N", GEOGCS["WGS 84", DATUM["WGS_1984"]], UNIT["metre", 1]]
! Legacy comment syntax.
9999 = GEOGCS[this is not valid wkt
EPSG:1 = GEOGCS["Foreign, skipped"]
bare line without separator
"#;

fn factory() -> PropertyAuthorityFactory {
    PropertyAuthorityFactory::from_str("test", 0, TABLE).unwrap()
}

#[test]
fn from_str_keeps_own_codes_and_skips_foreign_ones() {
    let f = factory();
    assert_eq!(f.authority(), "TEST");
    // 4326, TEST:32633 (qualifier stripped) and the malformed 9999 are kept;
    // the EPSG-qualified line and the separator-less line are not.
    assert_eq!(f.len(), 3);
    assert!(!f.is_empty());
}

#[test]
fn resolve_round_trips_the_requested_code() {
    let f = factory();
    let code = AuthorityCode::parse("TEST:4326").unwrap();
    let rs = f.resolve(&code).unwrap();

    assert_eq!(rs.name(), "WGS 84");
    assert!(rs.identifiers().contains(&code));
}

#[test]
fn resolve_rejects_other_namespaces() {
    let f = factory();
    let err = f
        .resolve(&AuthorityCode::parse("EPSG:4326").unwrap())
        .unwrap_err();
    assert!(matches!(err, TellusError::NoSuchAuthorityCode(_)));
}

#[test]
fn unknown_codes_are_not_found() {
    let f = factory();
    let err = f
        .resolve(&AuthorityCode::parse("TEST:777").unwrap())
        .unwrap_err();
    assert!(matches!(err, TellusError::NoSuchAuthorityCode(_)));
}

#[test]
fn malformed_definitions_fail_as_backing_store_errors() {
    let f = factory();
    let code = AuthorityCode::parse("TEST:9999").unwrap();

    let first = f.resolve(&code).unwrap_err();
    assert!(matches!(first, TellusError::BackingStore(_)));

    // The failure is cached and replayed verbatim.
    let second = f.resolve(&code).unwrap_err();
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn resolved_systems_are_shared_not_reparsed() {
    let f = factory();
    let code = AuthorityCode::parse("TEST:4326").unwrap();
    let a = f.resolve(&code).unwrap();
    let b = f.resolve(&code).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn supported_codes_filters_by_leading_keyword() {
    let f = factory();

    let all = f.supported_codes(CodeCategory::All);
    assert!(all.contains("TEST:4326"));
    assert!(all.contains("TEST:32633"));
    assert!(all.contains("TEST:9999"));

    let geographic = f.supported_codes(CodeCategory::Geographic);
    assert!(geographic.contains("TEST:4326"));
    assert!(!geographic.contains("TEST:32633"));

    let projected = f.supported_codes(CodeCategory::Projected);
    assert_eq!(projected.len(), 1);
    assert!(projected.contains("TEST:32633"));
}

#[test]
fn empty_authority_is_rejected() {
    assert!(PropertyAuthorityFactory::from_str("  ", 0, "").is_err());
}
