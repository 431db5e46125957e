//! Units of measure (GIGS 2001).

use std::fmt;
use std::str::FromStr;

use super::check_identification;
use crate::assertions::{Tolerance, assert_close};
use crate::case::{CaseContext, Expected, Outcome, TOLERANCE, VerificationCase};
use crate::error::{AssertionFailure, DataError, SkipReason};
use crate::referencing::{BaseUnit, Factories, Unit, UnitConverter, Validatable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Linear,
    Angular,
    Scale,
}

impl UnitKind {
    pub fn base_unit(self) -> BaseUnit {
        match self {
            UnitKind::Linear => BaseUnit::Metre,
            UnitKind::Angular => BaseUnit::Radian,
            UnitKind::Scale => BaseUnit::Unity,
        }
    }
}

impl FromStr for UnitKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "length" => Ok(UnitKind::Linear),
            "angle" | "angular" => Ok(UnitKind::Angular),
            "scale" => Ok(UnitKind::Scale),
            _ => Err(DataError::UnknownValue {
                field: "unit type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitKind::Linear => "Linear",
            UnitKind::Angular => "Angle",
            UnitKind::Scale => "Scale",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitDescriptor {
    pub code: i32,
    pub name: String,
    pub aliases: Vec<String>,
    pub kind: UnitKind,
    /// Base units in one unit. NaN when the ratio is not constant.
    pub unit_to_base: f64,
    pub important: bool,
}

impl UnitDescriptor {
    /// Packed degrees-minutes-seconds, compared against fixed samples.
    pub fn is_sexagesimal(&self) -> bool {
        self.kind == UnitKind::Angular && self.unit_to_base.is_nan()
    }

    /// The unit conversions are checked against.
    pub fn base_unit(&self) -> BaseUnit {
        if self.is_sexagesimal() {
            BaseUnit::Degree
        } else {
            self.kind.base_unit()
        }
    }
}

impl Expected for UnitDescriptor {
    fn object_type(&self) -> &'static str {
        "Unit"
    }

    fn code(&self) -> i32 {
        self.code
    }
}

/// `DDD.MMSSsss` inputs with their value in decimal degrees.
const SEXAGESIMAL_SAMPLES: [(f64, f64); 8] = [
    (10.0000, 10.00),
    (-10.0000, -10.00),
    (20.0036, 20.01),
    (-20.0036, -20.01),
    (30.3000, 30.50),
    (-30.3000, -30.50),
    (40.5924, 40.99),
    (-40.5924, -40.99),
];

const SWEEP_START: f64 = -90.0;
const SWEEP_STEP: f64 = 2.8125;
const SWEEP_COUNT: usize = 64;

fn verify_linear_conversions(
    name: &str,
    unit_to_base: f64,
    converter: &dyn UnitConverter,
) -> Result<(), AssertionFailure> {
    let tolerance = Tolerance::Absolute(TOLERANCE * unit_to_base.abs());
    assert_close(name, 0.0, converter.convert(0.0), tolerance)?;
    assert_close(name, unit_to_base, converter.convert(1.0), tolerance)?;
    assert_close(name, -unit_to_base, converter.convert(-1.0), tolerance)?;
    for step in 0..=SWEEP_COUNT {
        let sample = SWEEP_START + step as f64 * SWEEP_STEP;
        assert_close(name, sample * unit_to_base, converter.convert(sample), tolerance)?;
    }
    Ok(())
}

pub fn compare_unit(
    context: &CaseContext<'_>,
    expected: &UnitDescriptor,
    unit: &dyn Unit,
) -> Result<(), AssertionFailure> {
    context.validate(Validatable::Unit(unit))?;
    check_identification(context, "Unit", expected.code, &expected.name, &expected.aliases, unit)?;

    let base = expected.base_unit();
    let converter = unit.converter_to(base).map_err(|e| {
        AssertionFailure::new(format!(
            "Can not convert \"{}\" from \"{}\" to \"{}\": {}",
            expected.name,
            unit.name().unwrap_or_default(),
            base,
            e
        ))
    })?;
    if expected.is_sexagesimal() {
        let tolerance = Tolerance::Absolute(10.0 * TOLERANCE);
        for (dms, degrees) in SEXAGESIMAL_SAMPLES {
            assert_close(&expected.name, degrees, converter.convert(dms), tolerance)?;
        }
        Ok(())
    } else {
        verify_linear_conversions(&expected.name, expected.unit_to_base, converter.as_ref())
    }
}

pub fn unit_case<'a>(
    factories: &Factories<'a>,
    context: CaseContext<'a>,
    expected: UnitDescriptor,
) -> VerificationCase<'a, UnitDescriptor, Box<dyn Unit>> {
    match factories.cs {
        Some(factory) => VerificationCase::new(expected, context, move |d: &UnitDescriptor| {
            factory.create_unit(&d.code.to_string())
        }),
        None => VerificationCase::skipped(
            expected,
            context,
            SkipReason::MissingFactory("CsAuthorityFactory"),
        ),
    }
}

pub fn verify_unit(
    factories: &Factories<'_>,
    context: CaseContext<'_>,
    expected: UnitDescriptor,
) -> Outcome {
    unit_case(factories, context, expected)
        .verify(|ctx, d, unit| compare_unit(ctx, d, unit.as_ref()))
}
