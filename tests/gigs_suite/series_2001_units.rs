//! GIGS 2001: units of measure

use gigs_conformance::referencing::model::UnitScale;
use gigs_conformance::referencing::BaseUnit;
use gigs_conformance::series::{Suite, Summary};
use gigs_conformance::{CaseContext, Dataset, Factories, TableCache};

use crate::common::{ScriptedFactory, assert_all_passed, init_logging, record};

fn run_units(factory: &ScriptedFactory) -> Vec<gigs_conformance::CaseRecord> {
    let cache = TableCache::builtin();
    Suite::new(&cache, Factories::all(factory), CaseContext::default())
        .run(Dataset::Units)
        .unwrap()
}

/// Test that every tabulated unit converts as expected
#[test]
fn test_all_units() {
    init_logging();
    let factory = ScriptedFactory::new();
    let records = run_units(&factory);
    assert_all_passed(&records);
    assert_eq!(records.len(), 24);
    assert_eq!(factory.total_calls(), 24);
}

/// Test that a wrong conversion factor is caught
#[test]
fn test_wrong_factor() {
    let factory = ScriptedFactory::new().tamper(|f| {
        f.units.get_mut(&9002).unwrap().scale = UnitScale::Linear(0.3047);
    });
    let records = run_units(&factory);
    let foot = record(&records, 9002);
    assert!(foot.outcome.is_failed());
    assert!(foot.outcome.to_string().contains("foot: expected 0.3048 but got 0.3047"));
    assert_eq!(Summary::of(&records).failed, 1);
}

/// Test that a deviation far below the tolerance bound still passes
#[test]
fn test_factor_within_tolerance() {
    let factory = ScriptedFactory::new().tamper(|f| {
        f.units.get_mut(&9003).unwrap().scale = UnitScale::Linear(0.3048006096013);
    });
    let records = run_units(&factory);
    assert!(record(&records, 9003).outcome.is_passed());
}

/// Test that sexagesimal DMS is checked against its fixed samples
#[test]
fn test_sexagesimal_samples() {
    let factory = ScriptedFactory::new().tamper(|f| {
        f.units.get_mut(&9110).unwrap().scale = UnitScale::Linear(1.0);
    });
    let records = run_units(&factory);
    let dms = record(&records, 9110);
    assert!(dms.outcome.to_string().contains("sexagesimal DMS: expected 20.01 but got 20.0036"));
}

/// Test that a unit of the wrong dimension fails
#[test]
fn test_incommensurable_unit() {
    let factory = ScriptedFactory::new().tamper(|f| {
        f.units.get_mut(&9036).unwrap().base = BaseUnit::Radian;
    });
    let records = run_units(&factory);
    let km = record(&records, 9036);
    assert!(km.outcome.is_failed());
    assert!(km.outcome.to_string().contains("Can not convert \"kilometre\""));
}

/// Test that unknown units are skipped and counted apart from failures
#[test]
fn test_unsupported_units_are_skipped() {
    let factory = ScriptedFactory::new().unknown(9301).unknown(9113);
    let records = run_units(&factory);
    let summary = Summary::of(&records);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.passed, 22);
}

/// Test that importance flags are carried into the records
#[test]
fn test_important_flags() {
    let records = run_units(&ScriptedFactory::new());
    assert!(record(&records, 9001).important);
    assert!(!record(&records, 9084).important);
}
