//! Reference tables, as the harness loads them
//!
//! Covers the shipped GIGS resources, directory overrides, configuration and
//! the failures a corrupt table produces.

use std::fs;
use std::path::PathBuf;

use gigs_conformance::data::{DataFormat, ResourceSet};
use gigs_conformance::series::{self, Suite};
use gigs_conformance::{
    CapabilityKey, CaseContext, DataError, Dataset, Factories, HarnessConfig, TableCache,
};

use crate::common::init_logging;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gigs-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// Test that every shipped table parses with its declared columns
#[test]
fn test_builtin_row_counts() {
    init_logging();
    let cache = TableCache::builtin();
    let counts: Vec<(Dataset, usize)> = Dataset::ALL
        .iter()
        .map(|&d| (d, cache.table(d).unwrap().len()))
        .collect();
    assert_eq!(
        counts,
        vec![
            (Dataset::Units, 24),
            (Dataset::Ellipsoids, 18),
            (Dataset::PrimeMeridians, 14),
            (Dataset::GeodeticDatums, 10),
            (Dataset::Projections, 11),
            (Dataset::ProjectedCrs, 14),
            (Dataset::Transformations, 4),
            (Dataset::VerticalDatums, 15),
        ]
    );
}

/// Test that list columns split on the configured separator
#[test]
fn test_alias_lists() {
    let ellipsoids = series::ellipsoid_descriptors(&TableCache::builtin()).unwrap();
    let grs80 = ellipsoids.iter().find(|e| e.code == 7019).unwrap();
    assert_eq!(grs80.aliases, vec!["International 1979".to_string()]);
    let airy = ellipsoids.iter().find(|e| e.code == 7001).unwrap();
    assert!(airy.aliases.is_empty());
}

/// Test that a file in the data directory replaces the embedded table
#[test]
fn test_data_dir_overrides_embedded() {
    init_logging();
    let dir = scratch_dir("override");
    fs::write(
        dir.join("GIGS_2003_libPrimeMeridian.csv"),
        "# two rows only\n8901, TRUE, Greenwich, , 0.0\n8903, TRUE, Paris, \"Paris meridian\", 2.33722917\n",
    )
    .unwrap();

    let cache = TableCache::new(ResourceSet::builtin().with_dir(&dir), DataFormat::default());
    let meridians = series::prime_meridian_descriptors(&cache).unwrap();
    assert_eq!(meridians.len(), 2);
    assert_eq!(meridians[1].aliases, vec!["Paris meridian".to_string()]);

    // Tables without an override still come from the crate.
    assert_eq!(cache.table(Dataset::Units).unwrap().len(), 24);

    fs::remove_dir_all(&dir).ok();
}

/// Test configuration defaults and overrides
#[test]
fn test_config_deserialization() {
    let config: HarnessConfig = serde_json::from_value(serde_json::json!({
        "capabilities": { "is_standard_alias_supported": false },
        "data_format": { "list_separator": "|" },
        "data_dir": "/opt/gigs"
    }))
    .unwrap();

    let caps = config.capabilities;
    assert!(!caps.is_enabled(CapabilityKey::IsStandardAliasSupported));
    assert!(caps.is_enabled(CapabilityKey::IsStandardNameSupported));
    assert!(caps.is_enabled(CapabilityKey::IsDeprecatedObjectCreationSupported));
    assert_eq!(config.data_format.list_separator, '|');
    assert_eq!(config.data_format.column_separator, ',');
    assert_eq!(config.data_dir, Some(PathBuf::from("/opt/gigs")));

    let empty: HarnessConfig = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(empty.capabilities, HarnessConfig::default().capabilities);
}

/// Test that environment variables layer over the defaults
#[test]
fn test_config_load_from_environment() {
    // No other test reads GIGS__ variables.
    unsafe {
        std::env::set_var("GIGS__CAPABILITIES__IS_STANDARD_ALIAS_SUPPORTED", "false");
        std::env::set_var("GIGS__DATA_FORMAT__LIST_SEPARATOR", "|");
    }
    let loaded = HarnessConfig::load();
    unsafe {
        std::env::remove_var("GIGS__CAPABILITIES__IS_STANDARD_ALIAS_SUPPORTED");
        std::env::remove_var("GIGS__DATA_FORMAT__LIST_SEPARATOR");
    }

    let config = loaded.unwrap();
    assert!(!config.capabilities.is_enabled(CapabilityKey::IsStandardAliasSupported));
    assert!(config.capabilities.is_enabled(CapabilityKey::IsStandardNameSupported));
    assert_eq!(config.data_format.list_separator, '|');
    assert_eq!(config.data_format.column_separator, ',');
    assert_eq!(config.data_dir, None);
}

/// Test that the table cache honours the configured data directory
#[test]
fn test_cache_from_config() {
    let dir = scratch_dir("config");
    fs::write(
        dir.join("GIGS_2007_libTransformation.csv"),
        "1803, TRUE, AGD66 to GDA94 (11), , NTv2\n",
    )
    .unwrap();
    let config = HarnessConfig {
        data_dir: Some(dir.clone()),
        ..Default::default()
    };
    let cache = TableCache::from_config(&config);
    assert_eq!(cache.table(Dataset::Transformations).unwrap().len(), 1);
    fs::remove_dir_all(&dir).ok();
}

/// Test that a corrupt table aborts the run instead of failing cases
#[test]
fn test_corrupt_table_is_fatal() {
    init_logging();
    let resources = ResourceSet::builtin().with_resource(
        "GIGS_2002_libEllipsoid.csv",
        "7030, TRUE, WGS 84, WGS84, 6378137.0, metre, 1.0, 6378137.0, 298.257223563, , maybe\n",
    );
    let cache = TableCache::new(resources, DataFormat::default());
    let suite = Suite::new(&cache, Factories::none(), CaseContext::default());

    let err = suite.run(Dataset::Ellipsoids).unwrap_err();
    assert!(matches!(
        err,
        DataError::InvalidCell { line: 1, column: 10, .. }
    ));
    assert!(suite.run_all().is_err());
    // Other tables are unaffected.
    assert_eq!(suite.run(Dataset::Units).unwrap().len(), 24);
}

/// Test that the two tabulated forms of the semi-major axis must agree
#[test]
fn test_inconsistent_ellipsoid_row() {
    let resources = ResourceSet::builtin().with_resource(
        "GIGS_2002_libEllipsoid.csv",
        "7007, TRUE, Clarke 1858, , 20926348.0, Clarke's foot, 0.304797265, 6378000.0, , 20855233.0, FALSE\n",
    );
    let cache = TableCache::new(resources, DataFormat::default());
    let err = series::ellipsoid_descriptors(&cache).unwrap_err();
    assert!(matches!(err, DataError::Inconsistent { code: 7007, .. }));
}

/// Test that an unknown unit type is a data error
#[test]
fn test_unknown_unit_type() {
    let resources = ResourceSet::builtin()
        .with_resource("GIGS_2001_libUnit.csv", "9001, Time, second, 1.0, TRUE,\n");
    let cache = TableCache::new(resources, DataFormat::default());
    let err = series::unit_descriptors(&cache).unwrap_err();
    assert_eq!(
        err,
        DataError::UnknownValue {
            field: "unit type",
            value: "Time".to_string()
        }
    );
}
