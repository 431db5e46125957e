//! GIGS 2003 and 2004: prime meridians and geodetic datums

use std::f64::consts::PI;

use gigs_conformance::referencing::model::{DefaultUnit, ObjectProperties, UnitScale};
use gigs_conformance::referencing::BaseUnit;
use gigs_conformance::series::Suite;
use gigs_conformance::{CaseContext, CaseRecord, Dataset, Factories, TableCache};

use crate::common::{ScriptedFactory, assert_all_passed, init_logging, record};

fn run(factory: &ScriptedFactory, dataset: Dataset) -> Vec<CaseRecord> {
    let cache = TableCache::builtin();
    Suite::new(&cache, Factories::all(factory), CaseContext::default())
        .run(dataset)
        .unwrap()
}

fn grad() -> DefaultUnit {
    DefaultUnit::new(
        ObjectProperties::epsg(9105, "grad"),
        BaseUnit::Radian,
        UnitScale::Linear(PI / 200.0),
    )
}

/// Test every tabulated prime meridian
#[test]
fn test_all_prime_meridians() {
    init_logging();
    let records = run(&ScriptedFactory::new(), Dataset::PrimeMeridians);
    assert_all_passed(&records);
    assert_eq!(records.len(), 14);
}

/// Test that a longitude in the implementation's own unit is converted
#[test]
fn test_prime_meridian_in_grads() {
    let factory = ScriptedFactory::new().tamper(|f| {
        let paris = f.prime_meridians.get_mut(&8903).unwrap();
        paris.angular_unit = Some(grad());
        paris.greenwich_longitude = 2.33722917 / 0.9;
    });
    assert!(record(&run(&factory, Dataset::PrimeMeridians), 8903).outcome.is_passed());
}

/// Test that a longitude left in degrees under a grad unit fails
#[test]
fn test_prime_meridian_unit_mismatch() {
    let factory = ScriptedFactory::new().tamper(|f| {
        f.prime_meridians.get_mut(&8903).unwrap().angular_unit = Some(grad());
    });
    let records = run(&factory, Dataset::PrimeMeridians);
    let paris = record(&records, 8903);
    assert!(paris.outcome.is_failed());
    assert!(paris
        .outcome
        .to_string()
        .contains("PrimeMeridian.getGreenwichLongitude()"));
}

/// Test that angular tolerance is absolute
#[test]
fn test_prime_meridian_angular_tolerance() {
    let factory = ScriptedFactory::new()
        .tamper(|f| {
            f.prime_meridians.get_mut(&8909).unwrap().greenwich_longitude = -17.66666668;
        })
        .tamper(|f| {
            f.prime_meridians.get_mut(&8908).unwrap().greenwich_longitude = 106.8077204;
        });
    let records = run(&factory, Dataset::PrimeMeridians);
    assert!(record(&records, 8909).outcome.is_passed());
    assert!(record(&records, 8908).outcome.is_failed());
}

/// Test every tabulated geodetic datum with its dependencies
#[test]
fn test_all_geodetic_datums() {
    init_logging();
    let records = run(&ScriptedFactory::new(), Dataset::GeodeticDatums);
    assert_all_passed(&records);
    assert_eq!(records.len(), 10);
}

/// Test that a datum without a prime meridian fails
#[test]
fn test_datum_missing_prime_meridian() {
    let factory = ScriptedFactory::new().tamper(|f| {
        f.geodetic_datums.get_mut(&6813).unwrap().prime_meridian = None;
    });
    let records = run(&factory, Dataset::GeodeticDatums);
    assert_eq!(
        record(&records, 6813).outcome.to_string(),
        "failed: GeodeticDatum.getPrimeMeridian(): expected a value but got none"
    );
}

/// Test that the datum's own alias is compared
#[test]
fn test_datum_alias() {
    let factory = ScriptedFactory::new().tamper(|f| {
        let ntf = f.geodetic_datums.get_mut(&6807).unwrap();
        ntf.properties = ObjectProperties::epsg(6807, "Nouvelle Triangulation Francaise (Paris)")
            .with_aliases(["ntf (paris)"]);
    });
    let records = run(&factory, Dataset::GeodeticDatums);
    assert!(record(&records, 6807).outcome.is_passed());
}

/// Test that invalid dependencies are caught by validation
#[test]
fn test_datum_validates_its_ellipsoid() {
    let factory = ScriptedFactory::new().tamper(|f| {
        let datum = f.geodetic_datums.get_mut(&6277).unwrap();
        datum.ellipsoid.as_mut().unwrap().semi_minor_axis = f64::NAN;
    });
    let records = run(&factory, Dataset::GeodeticDatums);
    let outcome = record(&records, 6277).outcome.to_string();
    assert!(outcome.contains("GeodeticDatum validation: Ellipsoid.getSemiMinorAxis()"));
}
