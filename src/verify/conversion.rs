//! Map projections, created as coordinate operations (GIGS 2005).

use super::{check_identification, check_operation_kind};
use crate::assertions::{assert_equals_str, assert_present};
use crate::case::{CaseContext, Expected, Outcome, VerificationCase};
use crate::config::CapabilityKey;
use crate::error::{AssertionFailure, SkipReason, UnsupportedCode};
use crate::referencing::{CoordinateOperation, Factories, OperationKind, Validatable};

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionDescriptor {
    pub code: i32,
    pub name: String,
    /// Family the projection belongs to, e.g. `UTM`.
    pub projection_group: String,
    pub method_name: String,
    pub deprecated: bool,
    pub important: bool,
}

impl Expected for ConversionDescriptor {
    fn object_type(&self) -> &'static str {
        "Conversion"
    }

    fn code(&self) -> i32 {
        self.code
    }
}

pub fn compare_conversion(
    context: &CaseContext<'_>,
    expected: &ConversionDescriptor,
    operation: &dyn CoordinateOperation,
) -> Result<(), AssertionFailure> {
    check_operation_kind(expected.code, OperationKind::Conversion, operation.kind())?;
    context.validate(Validatable::CoordinateOperation(operation))?;
    check_identification(context, "Conversion", expected.code, &expected.name, &[], operation)?;

    let method = assert_present("Conversion.getMethod()", operation.method())?;
    context.check(CapabilityKey::IsStandardNameSupported, || {
        assert_equals_str("Conversion.getMethod().getName()", &expected.method_name, method.name())
    })
}

/// Deprecated codes are only requested when deprecated object creation is
/// enabled.
pub fn conversion_case<'a>(
    factories: &Factories<'a>,
    context: CaseContext<'a>,
    expected: ConversionDescriptor,
) -> VerificationCase<'a, ConversionDescriptor, Box<dyn CoordinateOperation>> {
    if expected.deprecated && !context.is_enabled(CapabilityKey::IsDeprecatedObjectCreationSupported) {
        let reason = SkipReason::DeprecatedObject(UnsupportedCode::new("Conversion", expected.code));
        return VerificationCase::skipped(expected, context, reason);
    }
    match factories.operation {
        Some(factory) => VerificationCase::new(expected, context, move |d: &ConversionDescriptor| {
            factory.create_coordinate_operation(&d.code.to_string())
        }),
        None => VerificationCase::skipped(
            expected,
            context,
            SkipReason::MissingFactory("CoordinateOperationAuthorityFactory"),
        ),
    }
}

pub fn verify_conversion(
    factories: &Factories<'_>,
    context: CaseContext<'_>,
    expected: ConversionDescriptor,
) -> Outcome {
    conversion_case(factories, context, expected)
        .verify(|ctx, d, operation| compare_conversion(ctx, d, operation.as_ref()))
}

/// Verifies several projections sharing a method, each in a fresh case.
/// Stops at the first case that does not pass.
pub fn verify_projections(
    factories: &Factories<'_>,
    context: CaseContext<'_>,
    expected: impl IntoIterator<Item = ConversionDescriptor>,
) -> Outcome {
    for descriptor in expected {
        let outcome = verify_conversion(factories, context, descriptor);
        if !outcome.is_passed() {
            return outcome;
        }
    }
    Outcome::Passed
}
