//! Prime meridians (GIGS 2003).

use super::check_identification;
use crate::assertions::{Tolerance, assert_close};
use crate::case::{ANGULAR_TOLERANCE, CaseContext, Expected, Outcome, VerificationCase};
use crate::error::{AssertionFailure, SkipReason};
use crate::referencing::{BaseUnit, Factories, PrimeMeridian, Validatable};

#[derive(Debug, Clone, PartialEq)]
pub struct PrimeMeridianDescriptor {
    pub code: i32,
    pub name: String,
    pub aliases: Vec<String>,
    /// Decimal degrees east of Greenwich.
    pub greenwich_longitude: f64,
    pub important: bool,
}

impl Expected for PrimeMeridianDescriptor {
    fn object_type(&self) -> &'static str {
        "PrimeMeridian"
    }

    fn code(&self) -> i32 {
        self.code
    }
}

pub fn compare_prime_meridian(
    context: &CaseContext<'_>,
    expected: &PrimeMeridianDescriptor,
    pm: &dyn PrimeMeridian,
) -> Result<(), AssertionFailure> {
    context.validate(Validatable::PrimeMeridian(pm))?;
    check_identification(
        context,
        "PrimeMeridian",
        expected.code,
        &expected.name,
        &expected.aliases,
        pm,
    )?;

    // The expected value is converted to the implementation's unit, so that
    // a failure reports numbers in that unit.
    let mut longitude = expected.greenwich_longitude;
    if let Some(unit) = pm.angular_unit() {
        let to_degrees = unit.converter_to(BaseUnit::Degree).map_err(|e| {
            AssertionFailure::new(format!("PrimeMeridian.getAngularUnit(): {}", e))
        })?;
        longitude = to_degrees.inverse().convert(longitude);
    }
    assert_close(
        "PrimeMeridian.getGreenwichLongitude()",
        longitude,
        pm.greenwich_longitude(),
        Tolerance::Absolute(ANGULAR_TOLERANCE),
    )
}

pub fn prime_meridian_case<'a>(
    factories: &Factories<'a>,
    context: CaseContext<'a>,
    expected: PrimeMeridianDescriptor,
) -> VerificationCase<'a, PrimeMeridianDescriptor, Box<dyn PrimeMeridian>> {
    match factories.datum {
        Some(factory) => {
            VerificationCase::new(expected, context, move |d: &PrimeMeridianDescriptor| {
                factory.create_prime_meridian(&d.code.to_string())
            })
        }
        None => VerificationCase::skipped(
            expected,
            context,
            SkipReason::MissingFactory("DatumAuthorityFactory"),
        ),
    }
}

pub fn verify_prime_meridian(
    factories: &Factories<'_>,
    context: CaseContext<'_>,
    expected: PrimeMeridianDescriptor,
) -> Outcome {
    prime_meridian_case(factories, context, expected)
        .verify(|ctx, d, pm| compare_prime_meridian(ctx, d, pm.as_ref()))
}
