//! GIGS 2008: vertical datums and vertical CRSs

use gigs_conformance::series::{self, Suite};
use gigs_conformance::verify::vertical::verify_vertical;
use gigs_conformance::verify::VerticalCrsDescriptor;
use gigs_conformance::{CaseContext, CaseError, Dataset, Factories, TableCache};

use crate::common::{ScriptedFactory, assert_all_passed, init_logging, record};

fn ahd() -> VerticalCrsDescriptor {
    series::vertical_descriptors(&TableCache::builtin())
        .unwrap()
        .into_iter()
        .find(|v| v.code == 5711)
        .unwrap()
}

/// Test every tabulated vertical CRS with its datum
#[test]
fn test_all_vertical_crs() {
    init_logging();
    let factory = ScriptedFactory::new();
    let cache = TableCache::builtin();
    let records = Suite::new(&cache, Factories::all(&factory), CaseContext::default())
        .run(Dataset::VerticalDatums)
        .unwrap();
    assert_all_passed(&records);
    assert_eq!(records.len(), 15);
    // Shared datums are created once per row.
    assert_eq!(factory.calls(5133), 2);
}

/// Test that each factory kind is exercised on its own
#[test]
fn test_single_factory_kinds() {
    let factory = ScriptedFactory::new();

    let datum_only = Factories::none().with_datum(&factory);
    assert!(verify_vertical(&datum_only, CaseContext::default(), ahd()).is_passed());
    assert_eq!(factory.calls(5111), 1);
    assert_eq!(factory.calls(5711), 0);

    let crs_only = Factories::none().with_crs(&factory);
    assert!(verify_vertical(&crs_only, CaseContext::default(), ahd()).is_passed());
    assert_eq!(factory.calls(5711), 1);
    assert_eq!(factory.calls(5111), 1);
}

/// Test that a row is skipped when neither factory is available
#[test]
fn test_no_factories() {
    let outcome = verify_vertical(&Factories::none(), CaseContext::default(), ahd());
    assert_eq!(
        outcome.to_string(),
        "skipped: No DatumAuthorityFactory or CrsAuthorityFactory available."
    );
}

/// Test that a failing datum stops the row before the CRS is created
#[test]
fn test_datum_failure_stops_row() {
    let factory = ScriptedFactory::new().failing(5111, "datum table locked");
    let outcome = verify_vertical(&Factories::all(&factory), CaseContext::default(), ahd());
    assert!(matches!(outcome.failure(), Some(CaseError::Factory(_))));
    assert_eq!(factory.calls(5711), 0);
}

/// Test that the CRS must reference the tabulated datum
#[test]
fn test_crs_with_wrong_datum() {
    let factory = ScriptedFactory::new().tamper(|f| {
        let tasmania = f.vertical_datums[&5112].clone();
        f.vertical_crs.get_mut(&5711).unwrap().datum = Some(tasmania);
    });
    let outcome = verify_vertical(&Factories::all(&factory), CaseContext::default(), ahd());
    assert!(outcome.is_failed());
    assert!(outcome.to_string().contains("VerticalCRS.getDatum().getIdentifiers()"));
}

/// Test that an unknown CRS code is a skip even when its datum passed
#[test]
fn test_unknown_crs_after_datum() {
    let factory = ScriptedFactory::new().unknown(5711);
    let outcome = verify_vertical(&Factories::all(&factory), CaseContext::default(), ahd());
    assert!(outcome.is_skipped());
    assert_eq!(factory.calls(5111), 1);
    let records = [gigs_conformance::CaseRecord {
        dataset: Dataset::VerticalDatums,
        code: 5711,
        name: "AHD height".to_string(),
        important: true,
        outcome,
    }];
    assert_eq!(
        record(&records, 5711).to_string(),
        "EPSG:5711 AHD height: skipped: VerticalCRS[5711] not supported."
    );
}
