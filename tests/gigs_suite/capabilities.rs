//! Capability flag gating
//!
//! A disabled flag skips its check entirely. Identifiers are checked
//! whatever the flags say.

use gigs_conformance::referencing::Identifier;
use gigs_conformance::series::Suite;
use gigs_conformance::{
    Capabilities, CapabilityKey, CaseContext, CaseError, Dataset, Factories, Outcome,
    StructuralValidator, TableCache,
};

use crate::common::{ScriptedFactory, init_logging, record};

fn context_without(keys: &[CapabilityKey]) -> CaseContext<'static> {
    let capabilities = keys
        .iter()
        .fold(Capabilities::default(), |caps, &key| caps.with(key, false));
    CaseContext::new(capabilities, &StructuralValidator)
}

fn run(factory: &ScriptedFactory, context: CaseContext<'_>, dataset: Dataset, code: i32) -> Outcome {
    let cache = TableCache::builtin();
    let records = Suite::new(&cache, Factories::all(factory), context)
        .run(dataset)
        .unwrap();
    record(&records, code).outcome.clone()
}

fn blamed_flag(outcome: &Outcome) -> Option<CapabilityKey> {
    match outcome.failure() {
        Some(CaseError::Assertion(failure)) => failure.capability,
        other => panic!("expected an assertion failure, got {:?}", other),
    }
}

/// Test that aliases are not compared when alias support is disabled
#[test]
fn test_alias_check_disabled() {
    init_logging();
    let factory = ScriptedFactory::new().tamper(|f| {
        f.ellipsoids.get_mut(&7019).unwrap().properties.aliases.clear();
    });

    let strict = run(&factory, CaseContext::default(), Dataset::Ellipsoids, 7019);
    assert_eq!(
        blamed_flag(&strict),
        Some(CapabilityKey::IsStandardAliasSupported)
    );

    let lenient = context_without(&[CapabilityKey::IsStandardAliasSupported]);
    assert!(run(&factory, lenient, Dataset::Ellipsoids, 7019).is_passed());
}

/// Test that names are not compared when name support is disabled
#[test]
fn test_name_check_disabled() {
    let factory = ScriptedFactory::new().tamper(|f| {
        f.prime_meridians.get_mut(&8901).unwrap().properties.name = Some("greenwich".to_string());
    });

    let strict = run(&factory, CaseContext::default(), Dataset::PrimeMeridians, 8901);
    assert_eq!(
        blamed_flag(&strict),
        Some(CapabilityKey::IsStandardNameSupported)
    );
    assert!(strict.to_string().contains("expected \"Greenwich\" but got \"greenwich\""));

    let lenient = context_without(&[CapabilityKey::IsStandardNameSupported]);
    assert!(run(&factory, lenient, Dataset::PrimeMeridians, 8901).is_passed());
}

/// Test that dependency identifiers are only checked when supported
#[test]
fn test_dependency_identification_disabled() {
    let factory = ScriptedFactory::new().tamper(|f| {
        let datum = f.geodetic_datums.get_mut(&6326).unwrap();
        datum.ellipsoid.as_mut().unwrap().properties.identifiers = vec![Identifier::epsg(7043)];
    });

    let strict = run(&factory, CaseContext::default(), Dataset::GeodeticDatums, 6326);
    assert_eq!(
        blamed_flag(&strict),
        Some(CapabilityKey::IsDependencyIdentificationSupported)
    );

    let lenient = context_without(&[CapabilityKey::IsDependencyIdentificationSupported]);
    assert!(run(&factory, lenient, Dataset::GeodeticDatums, 6326).is_passed());
}

/// Test that a wrong dependency name blames the name flag
#[test]
fn test_dependency_name_blames_name_flag() {
    let factory = ScriptedFactory::new().tamper(|f| {
        let datum = f.geodetic_datums.get_mut(&6807).unwrap();
        datum.prime_meridian.as_mut().unwrap().properties.name = Some("Paris RGS".to_string());
    });

    let strict = run(&factory, CaseContext::default(), Dataset::GeodeticDatums, 6807);
    assert_eq!(
        blamed_flag(&strict),
        Some(CapabilityKey::IsStandardNameSupported)
    );

    let without_names = context_without(&[CapabilityKey::IsStandardNameSupported]);
    assert!(run(&factory, without_names, Dataset::GeodeticDatums, 6807).is_passed());
}

/// Test that the identifier check ignores every flag
#[test]
fn test_identifier_always_checked() {
    let factory = ScriptedFactory::new().tamper(|f| {
        f.units.get_mut(&9001).unwrap().properties.identifiers.clear();
    });
    let everything_off = context_without(&CapabilityKey::ALL);
    let outcome = run(&factory, everything_off, Dataset::Units, 9001);
    assert_eq!(blamed_flag(&outcome), None);
    assert!(outcome.to_string().contains("Unit.getIdentifiers()"));
}

/// Test that the user-values flag is carried but gates no library check
#[test]
fn test_user_values_flag_is_reported_only() {
    let context = context_without(&[CapabilityKey::IsFactoryPreservingUserValues]);
    assert_eq!(
        context.capabilities.entries()[&CapabilityKey::IsFactoryPreservingUserValues],
        false
    );
    let factory = ScriptedFactory::new();
    assert!(run(&factory, context, Dataset::Ellipsoids, 7030).is_passed());
}
