//! Generic self-consistency checks run on every constructed object before it
//! is compared with the reference values.

use super::{
    AxisDirection, CoordinateOperation, CoordinateSystem, Ellipsoid, GeodeticDatum,
    IdentifiedObject, PrimeMeridian, ProjectedCrs, Unit, VerticalCrs, VerticalDatum,
};
use crate::error::AssertionFailure;

/// An object handed to a [`Validator`].
#[derive(Debug, Clone, Copy)]
pub enum Validatable<'a> {
    Unit(&'a dyn Unit),
    Ellipsoid(&'a dyn Ellipsoid),
    PrimeMeridian(&'a dyn PrimeMeridian),
    GeodeticDatum(&'a dyn GeodeticDatum),
    ProjectedCrs(&'a dyn ProjectedCrs),
    VerticalDatum(&'a dyn VerticalDatum),
    VerticalCrs(&'a dyn VerticalCrs),
    CoordinateOperation(&'a dyn CoordinateOperation),
}

impl Validatable<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Validatable::Unit(_) => "Unit",
            Validatable::Ellipsoid(_) => "Ellipsoid",
            Validatable::PrimeMeridian(_) => "PrimeMeridian",
            Validatable::GeodeticDatum(_) => "GeodeticDatum",
            Validatable::ProjectedCrs(_) => "ProjectedCRS",
            Validatable::VerticalDatum(_) => "VerticalDatum",
            Validatable::VerticalCrs(_) => "VerticalCRS",
            Validatable::CoordinateOperation(_) => "CoordinateOperation",
        }
    }
}

pub trait Validator {
    fn validate(&self, object: Validatable<'_>) -> Result<(), AssertionFailure>;
}

/// Accepts everything. For implementations that validate elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopValidator;

impl Validator for NoopValidator {
    fn validate(&self, _object: Validatable<'_>) -> Result<(), AssertionFailure> {
        Ok(())
    }
}

/// Checks properties every well-formed object has regardless of its
/// reference values: a non-blank name, well-formed identifiers, finite
/// positive axes, and so on. Dependencies are validated recursively.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl StructuralValidator {
    fn identification<T>(&self, kind: &str, object: &T) -> Result<(), AssertionFailure>
    where
        T: IdentifiedObject + ?Sized,
    {
        match object.name() {
            Some(name) if !name.trim().is_empty() => {}
            _ => return Err(AssertionFailure::new(format!("{}.getName(): missing or blank", kind))),
        }
        for identifier in object.identifiers() {
            if identifier.code_space.trim().is_empty() || identifier.code.trim().is_empty() {
                return Err(AssertionFailure::new(format!(
                    "{}.getIdentifiers(): incomplete identifier \"{}\"",
                    kind, identifier
                )));
            }
        }
        if object.aliases().iter().any(|alias| alias.tip().trim().is_empty()) {
            return Err(AssertionFailure::new(format!("{}.getAlias(): blank alias", kind)));
        }
        Ok(())
    }

    fn ellipsoid(&self, ellipsoid: &dyn Ellipsoid) -> Result<(), AssertionFailure> {
        self.identification("Ellipsoid", ellipsoid)?;
        let a = ellipsoid.semi_major_axis();
        let b = ellipsoid.semi_minor_axis();
        if !(a.is_finite() && a > 0.0) {
            return Err(AssertionFailure::new(format!(
                "Ellipsoid.getSemiMajorAxis(): expected a positive length but got {}",
                a
            )));
        }
        if !(b.is_finite() && b > 0.0) {
            return Err(AssertionFailure::new(format!(
                "Ellipsoid.getSemiMinorAxis(): expected a positive length but got {}",
                b
            )));
        }
        if b > a {
            return Err(AssertionFailure::new(format!(
                "Ellipsoid.getSemiMinorAxis(): {} is greater than the semi-major axis {}",
                b, a
            )));
        }
        let ivf = ellipsoid.inverse_flattening();
        if ivf.is_nan() || ivf <= 0.0 {
            return Err(AssertionFailure::new(format!(
                "Ellipsoid.getInverseFlattening(): expected a positive value but got {}",
                ivf
            )));
        }
        if ellipsoid.is_sphere() != ivf.is_infinite() {
            return Err(AssertionFailure::new(format!(
                "Ellipsoid.isSphere(): {} contradicts an inverse flattening of {}",
                ellipsoid.is_sphere(),
                ivf
            )));
        }
        if let Some(unit) = ellipsoid.axis_unit() {
            self.identification("Ellipsoid.getAxisUnit()", unit)?;
        }
        Ok(())
    }

    fn prime_meridian(&self, pm: &dyn PrimeMeridian) -> Result<(), AssertionFailure> {
        self.identification("PrimeMeridian", pm)?;
        let longitude = pm.greenwich_longitude();
        if !longitude.is_finite() {
            return Err(AssertionFailure::new(format!(
                "PrimeMeridian.getGreenwichLongitude(): expected a finite value but got {}",
                longitude
            )));
        }
        if let Some(unit) = pm.angular_unit() {
            self.identification("PrimeMeridian.getAngularUnit()", unit)?;
        }
        Ok(())
    }

    fn geodetic_datum(&self, kind: &str, datum: &dyn GeodeticDatum) -> Result<(), AssertionFailure> {
        self.identification(kind, datum)?;
        if let Some(ellipsoid) = datum.ellipsoid() {
            self.ellipsoid(ellipsoid)?;
        }
        if let Some(pm) = datum.prime_meridian() {
            self.prime_meridian(pm)?;
        }
        Ok(())
    }

    /// Every axis must have a direction, and no two axes may lie on the same
    /// line.
    fn coordinate_system(&self, kind: &str, cs: &dyn CoordinateSystem) -> Result<(), AssertionFailure> {
        self.identification(kind, cs)?;
        let dimension = cs.dimension();
        if dimension == 0 {
            return Err(AssertionFailure::new(format!("{}.getDimension(): no axis", kind)));
        }
        let mut lines = Vec::with_capacity(dimension);
        for i in 0..dimension {
            let direction = cs.axis_direction(i).ok_or_else(|| {
                AssertionFailure::new(format!("{}.getAxis({}).getDirection(): missing", kind, i))
            })?;
            let line = axis_line(direction);
            if line != AxisDirection::Other && lines.contains(&line) {
                return Err(AssertionFailure::new(format!(
                    "{}.getAxis({}).getDirection(): {} is colinear with a previous axis",
                    kind, i, direction
                )));
            }
            lines.push(line);
        }
        Ok(())
    }
}

fn axis_line(direction: AxisDirection) -> AxisDirection {
    match direction {
        AxisDirection::South => AxisDirection::North,
        AxisDirection::West => AxisDirection::East,
        AxisDirection::Down => AxisDirection::Up,
        other => other,
    }
}

impl Validator for StructuralValidator {
    fn validate(&self, object: Validatable<'_>) -> Result<(), AssertionFailure> {
        match object {
            Validatable::Unit(unit) => self.identification("Unit", unit),
            Validatable::Ellipsoid(ellipsoid) => self.ellipsoid(ellipsoid),
            Validatable::PrimeMeridian(pm) => self.prime_meridian(pm),
            Validatable::GeodeticDatum(datum) => self.geodetic_datum("GeodeticDatum", datum),
            Validatable::ProjectedCrs(crs) => {
                self.identification("ProjectedCRS", crs)?;
                if let Some(base) = crs.base_crs() {
                    self.identification("ProjectedCRS.getBaseCRS()", base)?;
                    if let Some(datum) = base.datum() {
                        self.geodetic_datum("ProjectedCRS.getBaseCRS().getDatum()", datum)?;
                    }
                }
                if let Some(cs) = crs.coordinate_system() {
                    self.coordinate_system("ProjectedCRS.getCoordinateSystem()", cs)?;
                }
                Ok(())
            }
            Validatable::VerticalDatum(datum) => self.identification("VerticalDatum", datum),
            Validatable::VerticalCrs(crs) => {
                self.identification("VerticalCRS", crs)?;
                if let Some(datum) = crs.datum() {
                    self.identification("VerticalCRS.getDatum()", datum)?;
                }
                Ok(())
            }
            Validatable::CoordinateOperation(operation) => {
                let kind = operation.kind().to_string();
                self.identification(&kind, operation)?;
                match operation.method() {
                    Some(method) => self.identification(&format!("{}.getMethod()", kind), method),
                    None => Err(AssertionFailure::new(format!("{}.getMethod(): missing", kind))),
                }
            }
        }
    }
}
