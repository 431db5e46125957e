//! Ellipsoids (GIGS 2002).

use super::check_identification;
use crate::assertions::{Tolerance, assert_close, assert_equals};
use crate::case::{CaseContext, Expected, Outcome, TOLERANCE, VerificationCase};
use crate::error::{AssertionFailure, DataError, DataResult, SkipReason};
use crate::referencing::{BaseUnit, Ellipsoid, Factories, Unit, Validatable};

/// Largest accepted gap, in metres, between the tabulated semi-major axis in
/// metres and the axis converted with the tabulated unit factor.
const METRE_CONSISTENCY: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct EllipsoidDescriptor {
    pub code: i32,
    pub name: String,
    pub aliases: Vec<String>,
    /// In the unit named by `axis_unit_name`.
    pub semi_major_axis: f64,
    pub axis_unit_name: String,
    pub to_metres: f64,
    pub semi_major_in_metres: f64,
    /// NaN when the ellipsoid is defined by its semi-minor axis.
    pub inverse_flattening: f64,
    /// NaN when the ellipsoid is defined by its inverse flattening.
    pub semi_minor_axis: f64,
    pub is_sphere: bool,
    pub important: bool,
}

impl EllipsoidDescriptor {
    /// Cross-checks the two tabulated forms of the semi-major axis.
    pub fn check_consistency(&self) -> DataResult<()> {
        let converted = self.semi_major_axis * self.to_metres;
        if (converted - self.semi_major_in_metres).abs() > METRE_CONSISTENCY {
            return Err(DataError::Inconsistent {
                code: self.code,
                message: format!(
                    "{} {} is {} metres, not {}",
                    self.semi_major_axis, self.axis_unit_name, converted, self.semi_major_in_metres
                ),
            });
        }
        Ok(())
    }

    fn scale(&self, in_metres: bool) -> f64 {
        if in_metres { self.to_metres } else { 1.0 }
    }
}

impl Expected for EllipsoidDescriptor {
    fn object_type(&self) -> &'static str {
        "Ellipsoid"
    }

    fn code(&self) -> i32 {
        self.code
    }
}

fn is_metre(unit: &dyn Unit) -> bool {
    unit.converter_to(BaseUnit::Metre)
        .map(|c| (c.convert(1.0) - 1.0).abs() <= TOLERANCE)
        .unwrap_or(false)
}

pub fn compare_ellipsoid(
    context: &CaseContext<'_>,
    expected: &EllipsoidDescriptor,
    ellipsoid: &dyn Ellipsoid,
) -> Result<(), AssertionFailure> {
    context.validate(Validatable::Ellipsoid(ellipsoid))?;
    check_identification(
        context,
        "Ellipsoid",
        expected.code,
        &expected.name,
        &expected.aliases,
        ellipsoid,
    )?;

    // A missing axis unit means metres. An implementation reporting metres
    // for an ellipsoid tabulated in another unit is compared in metres.
    let in_metres = expected.to_metres != 1.0 && ellipsoid.axis_unit().is_none_or(is_metre);
    let scale = expected.scale(in_metres);
    let tolerance = Tolerance::Relative(TOLERANCE);

    assert_close(
        "Ellipsoid.getSemiMajorAxis()",
        expected.semi_major_axis * scale,
        ellipsoid.semi_major_axis(),
        tolerance,
    )?;
    if !expected.semi_minor_axis.is_nan() {
        assert_close(
            "Ellipsoid.getSemiMinorAxis()",
            expected.semi_minor_axis * scale,
            ellipsoid.semi_minor_axis(),
            tolerance,
        )?;
    }
    if !expected.inverse_flattening.is_nan() {
        assert_close(
            "Ellipsoid.getInverseFlattening()",
            expected.inverse_flattening,
            ellipsoid.inverse_flattening(),
            tolerance,
        )?;
    }
    assert_equals("Ellipsoid.isSphere()", expected.is_sphere, ellipsoid.is_sphere())
}

pub fn ellipsoid_case<'a>(
    factories: &Factories<'a>,
    context: CaseContext<'a>,
    expected: EllipsoidDescriptor,
) -> VerificationCase<'a, EllipsoidDescriptor, Box<dyn Ellipsoid>> {
    match factories.datum {
        Some(factory) => VerificationCase::new(expected, context, move |d: &EllipsoidDescriptor| {
            factory.create_ellipsoid(&d.code.to_string())
        }),
        None => VerificationCase::skipped(
            expected,
            context,
            SkipReason::MissingFactory("DatumAuthorityFactory"),
        ),
    }
}

pub fn verify_ellipsoid(
    factories: &Factories<'_>,
    context: CaseContext<'_>,
    expected: EllipsoidDescriptor,
) -> Outcome {
    ellipsoid_case(factories, context, expected)
        .verify(|ctx, d, ellipsoid| compare_ellipsoid(ctx, d, ellipsoid.as_ref()))
}
