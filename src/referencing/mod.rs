//! The geodetic object model seen through the authority factories under test.
//!
//! Only the properties the harness compares are exposed. Implementations plug
//! their own types in through these traits; [`model`] holds plain structs
//! used by the pseudo factory and by tests.

pub mod factory;
pub mod model;
pub mod validator;

pub use factory::{
    CoordinateOperationAuthorityFactory, CrsAuthorityFactory, CsAuthorityFactory,
    DatumAuthorityFactory, Factories,
};
pub use validator::{StructuralValidator, Validatable, Validator};

use std::fmt;
use thiserror::Error;

/// Authority code space of every reference table.
pub const EPSG: &str = "EPSG";

/// A code in some authority's namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub code_space: String,
    pub code: String,
    pub version: Option<String>,
}

impl Identifier {
    pub fn new(code_space: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            code_space: code_space.into(),
            code: code.into(),
            version: None,
        }
    }

    pub fn epsg(code: impl fmt::Display) -> Self {
        Self::new(EPSG, code.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.code_space, self.code)
    }
}

/// An alternative name, optionally scoped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericName {
    pub scope: Option<String>,
    tip: String,
}

impl GenericName {
    pub fn new(tip: impl Into<String>) -> Self {
        Self {
            scope: None,
            tip: tip.into(),
        }
    }

    pub fn scoped(scope: impl Into<String>, tip: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            tip: tip.into(),
        }
    }

    /// The last element of the name, without its scope.
    pub fn tip(&self) -> &str {
        &self.tip
    }
}

impl fmt::Display for GenericName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}:{}", scope, self.tip),
            None => f.write_str(&self.tip),
        }
    }
}

pub trait IdentifiedObject: fmt::Debug {
    fn name(&self) -> Option<&str>;
    fn aliases(&self) -> &[GenericName];
    fn identifiers(&self) -> &[Identifier];
}

/// The units conversions are expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseUnit {
    Metre,
    Radian,
    Degree,
    Unity,
}

impl BaseUnit {
    pub fn is_angular(self) -> bool {
        matches!(self, BaseUnit::Radian | BaseUnit::Degree)
    }

    pub fn is_commensurable(self, other: BaseUnit) -> bool {
        self == other || (self.is_angular() && other.is_angular())
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BaseUnit::Metre => "metre",
            BaseUnit::Radian => "radian",
            BaseUnit::Degree => "degree",
            BaseUnit::Unity => "unity",
        };
        f.write_str(name)
    }
}

pub trait UnitConverter: fmt::Debug {
    fn convert(&self, value: f64) -> f64;
    fn inverse(&self) -> Box<dyn UnitConverter>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Can not convert \"{unit}\" to {target}")]
pub struct IncommensurableUnits {
    pub unit: String,
    pub target: BaseUnit,
}

pub trait Unit: IdentifiedObject {
    /// Converter from this unit to `target`.
    fn converter_to(&self, target: BaseUnit) -> Result<Box<dyn UnitConverter>, IncommensurableUnits>;
}

pub trait Ellipsoid: IdentifiedObject {
    /// Unit of the axis lengths. `None` is read as metres.
    fn axis_unit(&self) -> Option<&dyn Unit>;
    fn semi_major_axis(&self) -> f64;
    fn semi_minor_axis(&self) -> f64;
    /// Infinite for a sphere.
    fn inverse_flattening(&self) -> f64;
    fn is_sphere(&self) -> bool;
}

pub trait PrimeMeridian: IdentifiedObject {
    fn greenwich_longitude(&self) -> f64;
    /// Unit of the longitude. `None` is read as degrees.
    fn angular_unit(&self) -> Option<&dyn Unit>;
}

pub trait GeodeticDatum: IdentifiedObject {
    fn ellipsoid(&self) -> Option<&dyn Ellipsoid>;
    fn prime_meridian(&self) -> Option<&dyn PrimeMeridian>;
}

pub trait VerticalDatum: IdentifiedObject {}

pub trait VerticalCrs: IdentifiedObject {
    fn datum(&self) -> Option<&dyn VerticalDatum>;
}

/// Direction of a coordinate system axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    North,
    South,
    East,
    West,
    Up,
    Down,
    Other,
}

impl AxisDirection {
    pub fn abbreviation(self) -> &'static str {
        match self {
            AxisDirection::North => "N",
            AxisDirection::South => "S",
            AxisDirection::East => "E",
            AxisDirection::West => "W",
            AxisDirection::Up => "U",
            AxisDirection::Down => "D",
            AxisDirection::Other => "?",
        }
    }
}

impl fmt::Display for AxisDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AxisDirection::North => "NORTH",
            AxisDirection::South => "SOUTH",
            AxisDirection::East => "EAST",
            AxisDirection::West => "WEST",
            AxisDirection::Up => "UP",
            AxisDirection::Down => "DOWN",
            AxisDirection::Other => "OTHER",
        };
        f.write_str(name)
    }
}

pub trait CoordinateSystem: IdentifiedObject {
    fn dimension(&self) -> usize;
    /// `None` past the last dimension.
    fn axis_direction(&self, dimension: usize) -> Option<AxisDirection>;
}

pub trait GeographicCrs: IdentifiedObject {
    fn datum(&self) -> Option<&dyn GeodeticDatum>;
}

pub trait ProjectedCrs: IdentifiedObject {
    fn base_crs(&self) -> Option<&dyn GeographicCrs>;
    fn coordinate_system(&self) -> Option<&dyn CoordinateSystem>;

    /// The datum of the base CRS.
    fn datum(&self) -> Option<&dyn GeodeticDatum> {
        self.base_crs().and_then(|base| base.datum())
    }
}

pub trait OperationMethod: IdentifiedObject {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Conversion,
    Transformation,
    Other,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Conversion => "Conversion",
            OperationKind::Transformation => "Transformation",
            OperationKind::Other => "CoordinateOperation",
        };
        f.write_str(name)
    }
}

pub trait CoordinateOperation: IdentifiedObject {
    fn kind(&self) -> OperationKind;
    fn method(&self) -> Option<&dyn OperationMethod>;
}
