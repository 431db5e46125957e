//! One verifier per kind of reference object.
//!
//! Every verifier has the same shape: construct (or reuse) the object under
//! test, validate it, check its EPSG identifier unconditionally, then check
//! name, aliases and kind-specific properties under the capability flags.
//! Each module exposes an immutable descriptor, a `compare_*` function, a
//! `*_case` builder and a `verify_*` entry point.

pub mod conversion;
pub mod ellipsoid;
pub mod geodetic_datum;
pub mod prime_meridian;
pub mod projected_crs;
pub mod transformation;
pub mod unit;
pub mod vertical;

pub use conversion::{ConversionDescriptor, verify_conversion};
pub use ellipsoid::{EllipsoidDescriptor, verify_ellipsoid};
pub use geodetic_datum::{GeodeticDatumDescriptor, verify_geodetic_datum};
pub use prime_meridian::{PrimeMeridianDescriptor, verify_prime_meridian};
pub use projected_crs::{ProjectedCrsDescriptor, verify_projected_crs};
pub use transformation::{TransformationDescriptor, verify_transformation};
pub use unit::{UnitDescriptor, UnitKind, verify_unit};
pub use vertical::{VerticalCrsDescriptor, verify_vertical};

use crate::assertions::{assert_contains_all, assert_contains_code, assert_equals_str};
use crate::case::CaseContext;
use crate::config::CapabilityKey;
use crate::error::AssertionFailure;
use crate::referencing::{EPSG, IdentifiedObject, OperationKind};

/// Identifier, then name and aliases of the object under test itself.
pub(crate) fn check_identification<T>(
    context: &CaseContext<'_>,
    path: &str,
    code: i32,
    name: &str,
    aliases: &[String],
    object: &T,
) -> Result<(), AssertionFailure>
where
    T: IdentifiedObject + ?Sized,
{
    assert_contains_code(&format!("{}.getIdentifiers()", path), EPSG, code, object.identifiers())?;
    context.check(CapabilityKey::IsStandardNameSupported, || {
        assert_equals_str(&format!("{}.getName()", path), name, object.name())
    })?;
    context.check(CapabilityKey::IsStandardAliasSupported, || {
        assert_contains_all(&format!("{}.getAlias()", path), aliases, object.aliases())
    })
}

/// Identifier and name of an object referenced by the object under test.
/// Both are only checked when dependency identification is supported.
pub(crate) fn check_dependency<T>(
    context: &CaseContext<'_>,
    path: &str,
    code: i32,
    name: &str,
    object: &T,
) -> Result<(), AssertionFailure>
where
    T: IdentifiedObject + ?Sized,
{
    context.check(CapabilityKey::IsDependencyIdentificationSupported, || {
        assert_contains_code(&format!("{}.getIdentifiers()", path), EPSG, code, object.identifiers())?;
        context.check(CapabilityKey::IsStandardNameSupported, || {
            assert_equals_str(&format!("{}.getName()", path), name, object.name())
        })
    })
}

pub(crate) fn check_operation_kind(
    code: i32,
    expected: OperationKind,
    actual: OperationKind,
) -> Result<(), AssertionFailure> {
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionFailure::new(format!(
            "{}: expected a {} but got a {}",
            code, expected, actual
        )))
    }
}
