//! Vertical datums and the vertical CRSs built on them (GIGS 2008).
//!
//! Each row yields two cases: the datum through the datum factory, then the
//! CRS through the CRS factory. A missing factory only drops its own case;
//! the row is skipped when both are missing.

use super::{check_dependency, check_identification};
use crate::assertions::assert_present;
use crate::case::{CaseContext, Expected, Outcome, VerificationCase};
use crate::error::{AssertionFailure, CaseError, SkipReason};
use crate::referencing::{Factories, Validatable, VerticalCrs, VerticalDatum};

#[derive(Debug, Clone, PartialEq)]
pub struct VerticalCrsDescriptor {
    pub code: i32,
    pub name: String,
    pub aliases: Vec<String>,
    pub datum_code: i32,
    pub datum_name: String,
    pub important: bool,
}

impl VerticalCrsDescriptor {
    pub fn datum(&self) -> VerticalDatumDescriptor {
        VerticalDatumDescriptor {
            code: self.datum_code,
            name: self.datum_name.clone(),
            aliases: Vec::new(),
        }
    }
}

impl Expected for VerticalCrsDescriptor {
    fn object_type(&self) -> &'static str {
        "VerticalCRS"
    }

    fn code(&self) -> i32 {
        self.code
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerticalDatumDescriptor {
    pub code: i32,
    pub name: String,
    pub aliases: Vec<String>,
}

impl Expected for VerticalDatumDescriptor {
    fn object_type(&self) -> &'static str {
        "VerticalDatum"
    }

    fn code(&self) -> i32 {
        self.code
    }
}

pub fn compare_vertical_datum(
    context: &CaseContext<'_>,
    expected: &VerticalDatumDescriptor,
    datum: &dyn VerticalDatum,
) -> Result<(), AssertionFailure> {
    context.validate(Validatable::VerticalDatum(datum))?;
    check_identification(
        context,
        "VerticalDatum",
        expected.code,
        &expected.name,
        &expected.aliases,
        datum,
    )
}

pub fn compare_vertical_crs(
    context: &CaseContext<'_>,
    expected: &VerticalCrsDescriptor,
    crs: &dyn VerticalCrs,
) -> Result<(), AssertionFailure> {
    context.validate(Validatable::VerticalCrs(crs))?;
    check_identification(
        context,
        "VerticalCRS",
        expected.code,
        &expected.name,
        &expected.aliases,
        crs,
    )?;
    let datum = assert_present("VerticalCRS.getDatum()", crs.datum())?;
    check_dependency(
        context,
        "VerticalCRS.getDatum()",
        expected.datum_code,
        &expected.datum_name,
        datum,
    )
}

pub fn vertical_datum_case<'a>(
    factories: &Factories<'a>,
    context: CaseContext<'a>,
    expected: VerticalDatumDescriptor,
) -> VerificationCase<'a, VerticalDatumDescriptor, Box<dyn VerticalDatum>> {
    match factories.datum {
        Some(factory) => {
            VerificationCase::new(expected, context, move |d: &VerticalDatumDescriptor| {
                factory.create_vertical_datum(&d.code.to_string())
            })
        }
        None => VerificationCase::skipped(
            expected,
            context,
            SkipReason::MissingFactory("DatumAuthorityFactory"),
        ),
    }
}

pub fn vertical_crs_case<'a>(
    factories: &Factories<'a>,
    context: CaseContext<'a>,
    expected: VerticalCrsDescriptor,
) -> VerificationCase<'a, VerticalCrsDescriptor, Box<dyn VerticalCrs>> {
    match factories.crs {
        Some(factory) => VerificationCase::new(expected, context, move |d: &VerticalCrsDescriptor| {
            factory.create_vertical_crs(&d.code.to_string())
        }),
        None => VerificationCase::skipped(
            expected,
            context,
            SkipReason::MissingFactory("CrsAuthorityFactory"),
        ),
    }
}

pub fn verify_vertical(
    factories: &Factories<'_>,
    context: CaseContext<'_>,
    expected: VerticalCrsDescriptor,
) -> Outcome {
    if factories.datum.is_none() && factories.crs.is_none() {
        return Outcome::from_result(
            expected.object_type(),
            expected.code,
            Err(CaseError::Skipped(SkipReason::MissingFactory(
                "DatumAuthorityFactory or CrsAuthorityFactory",
            ))),
        );
    }
    let datum_outcome = if factories.datum.is_some() {
        vertical_datum_case(factories, context, expected.datum())
            .verify(|ctx, d, datum| compare_vertical_datum(ctx, d, datum.as_ref()))
    } else {
        Outcome::Passed
    };
    datum_outcome.and_then(|| {
        if factories.crs.is_some() {
            vertical_crs_case(factories, context, expected)
                .verify(|ctx, d, crs| compare_vertical_crs(ctx, d, crs.as_ref()))
        } else {
            Outcome::Passed
        }
    })
}
