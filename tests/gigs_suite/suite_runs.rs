//! Whole-table runs against the pseudo EPSG factory

use gigs_conformance::series::Summary;
use gigs_conformance::{
    Capabilities, CapabilityKey, CaseContext, Dataset, Factories, HarnessConfig,
    PseudoEpsgFactory, StructuralValidator, Suite, TableCache,
};

use crate::common::{assert_all_passed, init_logging};

/// Test that the pseudo factory passes every row of every table
#[test]
fn test_pseudo_factory_passes_everything() {
    init_logging();
    let cache = TableCache::builtin();
    let factory = PseudoEpsgFactory::from_tables(&cache).unwrap();
    let results = Suite::new(&cache, Factories::all(&factory), CaseContext::default())
        .run_all()
        .unwrap();

    let datasets: Vec<Dataset> = results.keys().copied().collect();
    assert_eq!(datasets, Dataset::ALL.to_vec());
    for records in results.values() {
        assert_all_passed(records);
    }
    let summary = Summary::of(results.values().flatten());
    assert_eq!(summary.total(), 110);
    assert_eq!(summary.passed, 110);
}

/// Test a run driven by configuration
#[test]
fn test_configured_run() {
    let config = HarnessConfig {
        capabilities: Capabilities::default()
            .with(CapabilityKey::IsDeprecatedObjectCreationSupported, false),
        ..Default::default()
    };
    let cache = TableCache::from_config(&config);
    let factory = PseudoEpsgFactory::from_tables(&cache).unwrap();
    let context = CaseContext::new(config.capabilities, &StructuralValidator);
    let results = Suite::new(&cache, Factories::all(&factory), context)
        .run_all()
        .unwrap();

    let summary = Summary::of(results.values().flatten());
    assert_eq!(summary.to_string(), "109 passed, 1 skipped, 0 failed");
}

/// Test that an implementation without factories skips everything
#[test]
fn test_no_factories_skips_everything() {
    let cache = TableCache::builtin();
    let results = Suite::new(&cache, Factories::none(), CaseContext::default())
        .run_all()
        .unwrap();
    let summary = Summary::of(results.values().flatten());
    assert_eq!(summary.skipped, summary.total());
    assert_eq!(summary.total(), 110);
}

/// Test that a partial implementation only runs what it supports
#[test]
fn test_operation_factory_only() {
    let cache = TableCache::builtin();
    let factory = PseudoEpsgFactory::from_tables(&cache).unwrap();
    let factories = Factories::none().with_operation(&factory);
    let suite = Suite::new(&cache, factories, CaseContext::default());

    let projections = Summary::of(&suite.run(Dataset::Projections).unwrap());
    assert_eq!(projections.passed, 11);
    let ellipsoids = Summary::of(&suite.run(Dataset::Ellipsoids).unwrap());
    assert_eq!(ellipsoids.skipped, 18);
}
