//! Coordinate transformations (GIGS 2007 and 2009).

use super::{check_identification, check_operation_kind};
use crate::assertions::{assert_equals_str, assert_present};
use crate::case::{CaseContext, Expected, Outcome, VerificationCase};
use crate::config::CapabilityKey;
use crate::error::{AssertionFailure, SkipReason};
use crate::referencing::{CoordinateOperation, Factories, OperationKind, Validatable};

#[derive(Debug, Clone, PartialEq)]
pub struct TransformationDescriptor {
    pub code: i32,
    pub name: String,
    pub aliases: Vec<String>,
    pub method_name: String,
    pub important: bool,
}

impl Expected for TransformationDescriptor {
    fn object_type(&self) -> &'static str {
        "Transformation"
    }

    fn code(&self) -> i32 {
        self.code
    }
}

pub fn compare_transformation(
    context: &CaseContext<'_>,
    expected: &TransformationDescriptor,
    operation: &dyn CoordinateOperation,
) -> Result<(), AssertionFailure> {
    check_operation_kind(expected.code, OperationKind::Transformation, operation.kind())?;
    context.validate(Validatable::CoordinateOperation(operation))?;
    check_identification(
        context,
        "Transformation",
        expected.code,
        &expected.name,
        &expected.aliases,
        operation,
    )?;

    let method = assert_present("Transformation.getMethod()", operation.method())?;
    context.check(CapabilityKey::IsStandardNameSupported, || {
        assert_equals_str(
            "Transformation.getMethod().getName()",
            &expected.method_name,
            method.name(),
        )
    })
}

pub fn transformation_case<'a>(
    factories: &Factories<'a>,
    context: CaseContext<'a>,
    expected: TransformationDescriptor,
) -> VerificationCase<'a, TransformationDescriptor, Box<dyn CoordinateOperation>> {
    match factories.operation {
        Some(factory) => {
            VerificationCase::new(expected, context, move |d: &TransformationDescriptor| {
                factory.create_coordinate_operation(&d.code.to_string())
            })
        }
        None => VerificationCase::skipped(
            expected,
            context,
            SkipReason::MissingFactory("CoordinateOperationAuthorityFactory"),
        ),
    }
}

pub fn verify_transformation(
    factories: &Factories<'_>,
    context: CaseContext<'_>,
    expected: TransformationDescriptor,
) -> Outcome {
    transformation_case(factories, context, expected)
        .verify(|ctx, d, operation| compare_transformation(ctx, d, operation.as_ref()))
}
