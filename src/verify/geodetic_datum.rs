//! Geodetic datums with their ellipsoid and prime meridian (GIGS 2004).
//!
//! The datum itself is identified like any other object. Its ellipsoid and
//! prime meridian must be present; their identifiers and names are checked
//! only when dependency identification is supported.

use super::{check_dependency, check_identification};
use crate::assertions::assert_present;
use crate::case::{CaseContext, Expected, Outcome, VerificationCase};
use crate::error::{AssertionFailure, SkipReason};
use crate::referencing::{Factories, GeodeticDatum, Validatable};

#[derive(Debug, Clone, PartialEq)]
pub struct GeodeticDatumDescriptor {
    pub code: i32,
    pub name: String,
    pub aliases: Vec<String>,
    pub ellipsoid_code: i32,
    pub ellipsoid_name: String,
    pub prime_meridian_code: i32,
    pub prime_meridian_name: String,
    pub important: bool,
}

impl Expected for GeodeticDatumDescriptor {
    fn object_type(&self) -> &'static str {
        "GeodeticDatum"
    }

    fn code(&self) -> i32 {
        self.code
    }
}

pub fn compare_geodetic_datum(
    context: &CaseContext<'_>,
    expected: &GeodeticDatumDescriptor,
    datum: &dyn GeodeticDatum,
) -> Result<(), AssertionFailure> {
    context.validate(Validatable::GeodeticDatum(datum))?;
    check_identification(
        context,
        "GeodeticDatum",
        expected.code,
        &expected.name,
        &expected.aliases,
        datum,
    )?;

    let ellipsoid = assert_present("GeodeticDatum.getEllipsoid()", datum.ellipsoid())?;
    check_dependency(
        context,
        "GeodeticDatum.getEllipsoid()",
        expected.ellipsoid_code,
        &expected.ellipsoid_name,
        ellipsoid,
    )?;

    let pm = assert_present("GeodeticDatum.getPrimeMeridian()", datum.prime_meridian())?;
    check_dependency(
        context,
        "GeodeticDatum.getPrimeMeridian()",
        expected.prime_meridian_code,
        &expected.prime_meridian_name,
        pm,
    )
}

pub fn geodetic_datum_case<'a>(
    factories: &Factories<'a>,
    context: CaseContext<'a>,
    expected: GeodeticDatumDescriptor,
) -> VerificationCase<'a, GeodeticDatumDescriptor, Box<dyn GeodeticDatum>> {
    match factories.datum {
        Some(factory) => {
            VerificationCase::new(expected, context, move |d: &GeodeticDatumDescriptor| {
                factory.create_geodetic_datum(&d.code.to_string())
            })
        }
        None => VerificationCase::skipped(
            expected,
            context,
            SkipReason::MissingFactory("DatumAuthorityFactory"),
        ),
    }
}

pub fn verify_geodetic_datum(
    factories: &Factories<'_>,
    context: CaseContext<'_>,
    expected: GeodeticDatumDescriptor,
) -> Outcome {
    geodetic_datum_case(factories, context, expected)
        .verify(|ctx, d, datum| compare_geodetic_datum(ctx, d, datum.as_ref()))
}
