//! Plain data implementations of the object traits.

use std::f64::consts::PI;

use super::{
    AxisDirection, BaseUnit, CoordinateOperation, CoordinateSystem, Ellipsoid, GenericName,
    GeodeticDatum, GeographicCrs, IdentifiedObject, Identifier, IncommensurableUnits,
    OperationKind, OperationMethod, PrimeMeridian, ProjectedCrs, Unit, UnitConverter, VerticalCrs,
    VerticalDatum,
};

/// Name, aliases and identifiers shared by every object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectProperties {
    pub name: Option<String>,
    pub aliases: Vec<GenericName>,
    pub identifiers: Vec<Identifier>,
}

impl ObjectProperties {
    /// Properties of an object named `name` with the single identifier `EPSG:code`.
    pub fn epsg(code: i32, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            aliases: Vec::new(),
            identifiers: vec![Identifier::epsg(code)],
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(GenericName::new));
        self
    }

    pub fn with_identifier(mut self, identifier: Identifier) -> Self {
        self.identifiers.push(identifier);
        self
    }
}

macro_rules! identified_object {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IdentifiedObject for $ty {
                fn name(&self) -> Option<&str> {
                    self.properties.name.as_deref()
                }

                fn aliases(&self) -> &[GenericName] {
                    &self.properties.aliases
                }

                fn identifiers(&self) -> &[Identifier] {
                    &self.properties.identifiers
                }
            }
        )+
    };
}

identified_object!(
    DefaultUnit,
    DefaultEllipsoid,
    DefaultPrimeMeridian,
    DefaultGeodeticDatum,
    DefaultCartesianCs,
    DefaultGeographicCrs,
    DefaultProjectedCrs,
    DefaultVerticalDatum,
    DefaultVerticalCrs,
    DefaultOperationMethod,
    DefaultCoordinateOperation,
);

/// Multiplies by a constant factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearConverter {
    pub factor: f64,
}

impl UnitConverter for LinearConverter {
    fn convert(&self, value: f64) -> f64 {
        value * self.factor
    }

    fn inverse(&self) -> Box<dyn UnitConverter> {
        Box::new(LinearConverter {
            factor: 1.0 / self.factor,
        })
    }
}

/// Reads the `DDD.MMSSsss` packed sexagesimal notation as decimal degrees,
/// then scales the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SexagesimalConverter {
    pub scale: f64,
}

impl UnitConverter for SexagesimalConverter {
    fn convert(&self, value: f64) -> f64 {
        dms_to_degrees(value) * self.scale
    }

    fn inverse(&self) -> Box<dyn UnitConverter> {
        Box::new(SexagesimalInverse { scale: self.scale })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SexagesimalInverse {
    pub scale: f64,
}

impl UnitConverter for SexagesimalInverse {
    fn convert(&self, value: f64) -> f64 {
        degrees_to_dms(value / self.scale)
    }

    fn inverse(&self) -> Box<dyn UnitConverter> {
        Box::new(SexagesimalConverter { scale: self.scale })
    }
}

// Absorbs representation error so that 30.3000 reads as 30 minutes, not 29.
const DMS_EPSILON: f64 = 1e-9;

pub fn dms_to_degrees(value: f64) -> f64 {
    let magnitude = value.abs();
    let degrees = (magnitude + DMS_EPSILON).floor();
    let rest = (magnitude - degrees) * 100.0;
    let minutes = (rest + DMS_EPSILON).floor();
    let seconds = (rest - minutes) * 100.0;
    (degrees + minutes / 60.0 + seconds / 3600.0).copysign(value)
}

pub fn degrees_to_dms(value: f64) -> f64 {
    let magnitude = value.abs();
    let degrees = (magnitude + DMS_EPSILON).floor();
    let total_minutes = (magnitude - degrees) * 60.0;
    let minutes = (total_minutes + DMS_EPSILON).floor();
    let seconds = (total_minutes - minutes) * 60.0;
    (degrees + minutes / 100.0 + seconds / 10000.0).copysign(value)
}

/// How a unit relates to its base unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitScale {
    /// Base units per unit.
    Linear(f64),
    /// Packed degrees-minutes-seconds; the base unit is the degree.
    Sexagesimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultUnit {
    pub properties: ObjectProperties,
    pub base: BaseUnit,
    pub scale: UnitScale,
}

impl DefaultUnit {
    pub fn new(properties: ObjectProperties, base: BaseUnit, scale: UnitScale) -> Self {
        Self {
            properties,
            base,
            scale,
        }
    }

    pub fn metre() -> Self {
        Self::new(
            ObjectProperties::epsg(9001, "metre"),
            BaseUnit::Metre,
            UnitScale::Linear(1.0),
        )
    }

    pub fn degree() -> Self {
        Self::new(
            ObjectProperties::epsg(9102, "degree"),
            BaseUnit::Radian,
            UnitScale::Linear(PI / 180.0),
        )
    }
}

impl Unit for DefaultUnit {
    fn converter_to(&self, target: BaseUnit) -> Result<Box<dyn UnitConverter>, IncommensurableUnits> {
        if !self.base.is_commensurable(target) {
            return Err(IncommensurableUnits {
                unit: self.properties.name.clone().unwrap_or_default(),
                target,
            });
        }
        let base_to_target = match (self.base, target) {
            (BaseUnit::Radian, BaseUnit::Degree) => 180.0 / PI,
            (BaseUnit::Degree, BaseUnit::Radian) => PI / 180.0,
            _ => 1.0,
        };
        let converter: Box<dyn UnitConverter> = match self.scale {
            UnitScale::Linear(factor) => Box::new(LinearConverter {
                factor: factor * base_to_target,
            }),
            UnitScale::Sexagesimal => Box::new(SexagesimalConverter {
                scale: base_to_target,
            }),
        };
        Ok(converter)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultEllipsoid {
    pub properties: ObjectProperties,
    pub axis_unit: Option<DefaultUnit>,
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
    pub inverse_flattening: f64,
    pub sphere: bool,
}

impl DefaultEllipsoid {
    pub fn from_inverse_flattening(
        properties: ObjectProperties,
        semi_major_axis: f64,
        inverse_flattening: f64,
        axis_unit: Option<DefaultUnit>,
    ) -> Self {
        let sphere = inverse_flattening.is_infinite();
        let semi_minor_axis = if sphere {
            semi_major_axis
        } else {
            semi_major_axis * (1.0 - 1.0 / inverse_flattening)
        };
        Self {
            properties,
            axis_unit,
            semi_major_axis,
            semi_minor_axis,
            inverse_flattening,
            sphere,
        }
    }

    pub fn from_semi_minor_axis(
        properties: ObjectProperties,
        semi_major_axis: f64,
        semi_minor_axis: f64,
        axis_unit: Option<DefaultUnit>,
    ) -> Self {
        let sphere = semi_major_axis == semi_minor_axis;
        let inverse_flattening = if sphere {
            f64::INFINITY
        } else {
            semi_major_axis / (semi_major_axis - semi_minor_axis)
        };
        Self {
            properties,
            axis_unit,
            semi_major_axis,
            semi_minor_axis,
            inverse_flattening,
            sphere,
        }
    }
}

impl Ellipsoid for DefaultEllipsoid {
    fn axis_unit(&self) -> Option<&dyn Unit> {
        self.axis_unit.as_ref().map(|u| u as &dyn Unit)
    }

    fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    fn inverse_flattening(&self) -> f64 {
        self.inverse_flattening
    }

    fn is_sphere(&self) -> bool {
        self.sphere
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultPrimeMeridian {
    pub properties: ObjectProperties,
    pub greenwich_longitude: f64,
    pub angular_unit: Option<DefaultUnit>,
}

impl PrimeMeridian for DefaultPrimeMeridian {
    fn greenwich_longitude(&self) -> f64 {
        self.greenwich_longitude
    }

    fn angular_unit(&self) -> Option<&dyn Unit> {
        self.angular_unit.as_ref().map(|u| u as &dyn Unit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultGeodeticDatum {
    pub properties: ObjectProperties,
    pub ellipsoid: Option<DefaultEllipsoid>,
    pub prime_meridian: Option<DefaultPrimeMeridian>,
}

impl GeodeticDatum for DefaultGeodeticDatum {
    fn ellipsoid(&self) -> Option<&dyn Ellipsoid> {
        self.ellipsoid.as_ref().map(|e| e as &dyn Ellipsoid)
    }

    fn prime_meridian(&self) -> Option<&dyn PrimeMeridian> {
        self.prime_meridian.as_ref().map(|pm| pm as &dyn PrimeMeridian)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultCartesianCs {
    pub properties: ObjectProperties,
    pub axes: Vec<AxisDirection>,
}

impl DefaultCartesianCs {
    /// An unidentified CS named after its axes, e.g. `Cartesian 2D CS. Axes: E, N.`
    pub fn new(axes: Vec<AxisDirection>) -> Self {
        let abbreviations: Vec<&str> = axes.iter().map(|a| a.abbreviation()).collect();
        let name = format!("Cartesian {}D CS. Axes: {}.", axes.len(), abbreviations.join(", "));
        Self {
            properties: ObjectProperties {
                name: Some(name),
                ..Default::default()
            },
            axes,
        }
    }
}

impl CoordinateSystem for DefaultCartesianCs {
    fn dimension(&self) -> usize {
        self.axes.len()
    }

    fn axis_direction(&self, dimension: usize) -> Option<AxisDirection> {
        self.axes.get(dimension).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultGeographicCrs {
    pub properties: ObjectProperties,
    pub datum: Option<DefaultGeodeticDatum>,
}

impl GeographicCrs for DefaultGeographicCrs {
    fn datum(&self) -> Option<&dyn GeodeticDatum> {
        self.datum.as_ref().map(|d| d as &dyn GeodeticDatum)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultProjectedCrs {
    pub properties: ObjectProperties,
    pub base_crs: Option<DefaultGeographicCrs>,
    pub coordinate_system: Option<DefaultCartesianCs>,
}

impl ProjectedCrs for DefaultProjectedCrs {
    fn base_crs(&self) -> Option<&dyn GeographicCrs> {
        self.base_crs.as_ref().map(|b| b as &dyn GeographicCrs)
    }

    fn coordinate_system(&self) -> Option<&dyn CoordinateSystem> {
        self.coordinate_system
            .as_ref()
            .map(|cs| cs as &dyn CoordinateSystem)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultVerticalDatum {
    pub properties: ObjectProperties,
}

impl VerticalDatum for DefaultVerticalDatum {}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultVerticalCrs {
    pub properties: ObjectProperties,
    pub datum: Option<DefaultVerticalDatum>,
}

impl VerticalCrs for DefaultVerticalCrs {
    fn datum(&self) -> Option<&dyn VerticalDatum> {
        self.datum.as_ref().map(|d| d as &dyn VerticalDatum)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultOperationMethod {
    pub properties: ObjectProperties,
}

impl DefaultOperationMethod {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            properties: ObjectProperties {
                name: Some(name.into()),
                ..Default::default()
            },
        }
    }
}

impl OperationMethod for DefaultOperationMethod {}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultCoordinateOperation {
    pub properties: ObjectProperties,
    pub kind: OperationKind,
    pub method: Option<DefaultOperationMethod>,
}

impl CoordinateOperation for DefaultCoordinateOperation {
    fn kind(&self) -> OperationKind {
        self.kind
    }

    fn method(&self) -> Option<&dyn OperationMethod> {
        self.method.as_ref().map(|m| m as &dyn OperationMethod)
    }
}
