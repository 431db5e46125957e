//! Case lifecycle and comparison primitives
//!
//! Construction happens at most once per case, unknown codes become skips,
//! and every other factory error is a failure.

use gigs_conformance::assertions::{
    Tolerance, assert_close, assert_contains_all, assert_contains_code,
    assert_contains_name_or_alias,
};
use gigs_conformance::error::UnsupportedCode;
use gigs_conformance::referencing::{GenericName, Identifier};
use gigs_conformance::series;
use gigs_conformance::verify::ellipsoid::{ellipsoid_case, verify_ellipsoid};
use gigs_conformance::verify::unit::verify_unit;
use gigs_conformance::{
    CaseContext, CaseError, Factories, Outcome, SkipReason, TOLERANCE, TableCache,
};

use crate::common::{ScriptedFactory, init_logging};

fn wgs84() -> gigs_conformance::verify::EllipsoidDescriptor {
    series::ellipsoid_descriptors(&TableCache::builtin())
        .unwrap()
        .into_iter()
        .find(|e| e.code == 7030)
        .unwrap()
}

/// Test that the object under test is constructed once and then reused
#[test]
fn test_at_most_one_construction() {
    init_logging();
    let factory = ScriptedFactory::new();
    let factories = Factories::all(&factory);
    let case = ellipsoid_case(&factories, CaseContext::default(), wgs84());

    assert!(!case.is_resolved());
    let first = case.object_under_test().unwrap();
    let second = case.object_under_test().unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(factory.calls(7030), 1);
    assert!(case.is_resolved());
}

/// Test that separate cases never share a constructed object
#[test]
fn test_no_caching_across_cases() {
    let factory = ScriptedFactory::new();
    let factories = Factories::all(&factory);
    assert!(verify_ellipsoid(&factories, CaseContext::default(), wgs84()).is_passed());
    assert!(verify_ellipsoid(&factories, CaseContext::default(), wgs84()).is_passed());
    assert_eq!(factory.calls(7030), 2);
}

/// Test that an unknown code is skipped without an assertion failure
#[test]
fn test_unknown_code_is_skipped() {
    init_logging();
    let factory = ScriptedFactory::new().unknown(7030);
    let outcome = verify_ellipsoid(&Factories::all(&factory), CaseContext::default(), wgs84());
    assert_eq!(
        outcome,
        Outcome::Skipped(SkipReason::UnsupportedCode(UnsupportedCode::new(
            "Ellipsoid",
            7030
        )))
    );
    assert!(outcome.failure().is_none());
    assert_eq!(outcome.to_string(), "skipped: Ellipsoid[7030] not supported.");
}

/// Test that any other factory error fails the case with its context chain
#[test]
fn test_factory_error_fails() {
    let factory = ScriptedFactory::new().failing(7030, "connection reset");
    let outcome = verify_ellipsoid(&Factories::all(&factory), CaseContext::default(), wgs84());
    match outcome.failure() {
        Some(CaseError::Factory(err)) => assert_eq!(
            err.to_string(),
            "Factory failure: creating Ellipsoid from code 7030: connection reset"
        ),
        other => panic!("expected a factory failure, got {:?}", other),
    }
}

/// Test that a missing factory skips the case without constructing anything
#[test]
fn test_missing_factory_is_skipped() {
    let units = series::unit_descriptors(&TableCache::builtin()).unwrap();
    let metre = units.into_iter().next().unwrap();
    let outcome = verify_unit(&Factories::none(), CaseContext::default(), metre);
    assert_eq!(outcome.to_string(), "skipped: No CsAuthorityFactory available.");
}

/// Test relative tolerance against the semi-major axis of WGS 84
#[test]
fn test_relative_tolerance() {
    let tolerance = Tolerance::Relative(TOLERANCE);
    assert!(assert_close("a", 6378137.0, 6378137.0000005, tolerance).is_ok());

    let bound = tolerance.bound(6378137.0);
    let failure = assert_close("a", 6378137.0, 6378137.0 + 10.0 * bound, tolerance).unwrap_err();
    assert!(failure.message.starts_with("a: expected 6378137 but got"));
}

/// Test that exactly one matching EPSG identifier is required
#[test]
fn test_exactly_one_code() {
    let epsg = Identifier::epsg(7030);
    let esri = Identifier::new("ESRI", "7030");

    assert!(assert_contains_code("Ellipsoid", "EPSG", 7030, &[esri.clone(), epsg.clone()]).is_ok());
    assert!(assert_contains_code("Ellipsoid", "epsg", 7030, &[epsg.clone()]).is_ok());

    let none = assert_contains_code("Ellipsoid", "EPSG", 7030, &[esri]).unwrap_err();
    assert_eq!(
        none.message,
        "Ellipsoid: occurrence of EPSG:7030: expected 1 but got 0"
    );
    let twice = assert_contains_code("Ellipsoid", "EPSG", 7030, &[epsg.clone(), epsg]).unwrap_err();
    assert!(twice.message.ends_with("expected 1 but got 2"));

    let textual = assert_contains_code(
        "Ellipsoid",
        "EPSG",
        7030,
        &[Identifier::new("EPSG", "WGS84")],
    )
    .unwrap_err();
    assert_eq!(
        textual.message,
        "Ellipsoid.getCode(): expected 7030 but got a non-numerical value: \"WGS84\""
    );
}

/// Test case-insensitive alias containment
#[test]
fn test_alias_containment_ignores_case() {
    let expected = vec!["WGS84".to_string()];
    for spelling in ["wgs84", "WGS84", "Wgs84"] {
        let actual = [GenericName::new("World Geodetic System 1984"), GenericName::new(spelling)];
        assert!(assert_contains_all("Ellipsoid.getAlias()", &expected, &actual).is_ok());
    }
    let failure =
        assert_contains_all("Ellipsoid.getAlias()", &expected, &[GenericName::new("WGS 84")])
            .unwrap_err();
    assert!(failure.message.contains("missing \"WGS84\""));
    assert!(assert_contains_all("Ellipsoid.getAlias()", &[], &[]).is_ok());
}

/// Test matching against the name or any alias
#[test]
fn test_name_or_alias() {
    let factory = gigs_conformance::PseudoEpsgFactory::builtin().unwrap();
    let grs80 = &factory.ellipsoids[&7019];
    assert!(assert_contains_name_or_alias("Ellipsoid", "grs 1980", grs80).is_ok());
    assert!(assert_contains_name_or_alias("Ellipsoid", "International 1979", grs80).is_ok());
    assert!(assert_contains_name_or_alias("Ellipsoid", "Hayford 1909", grs80).is_err());
}
