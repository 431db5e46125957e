//! Authority factories: the seam through which the implementation under test
//! builds objects from reference codes.
//!
//! A code the implementation does not know must be reported as
//! [`FactoryError::NoSuchCode`]. Any other error counts against the
//! implementation.

use super::{
    CoordinateOperation, Ellipsoid, GeodeticDatum, PrimeMeridian, ProjectedCrs, Unit, VerticalCrs,
    VerticalDatum,
};
use crate::error::FactoryError;

pub trait CsAuthorityFactory {
    fn create_unit(&self, code: &str) -> Result<Box<dyn Unit>, FactoryError>;
}

pub trait DatumAuthorityFactory {
    fn create_ellipsoid(&self, code: &str) -> Result<Box<dyn Ellipsoid>, FactoryError>;
    fn create_prime_meridian(&self, code: &str) -> Result<Box<dyn PrimeMeridian>, FactoryError>;
    fn create_geodetic_datum(&self, code: &str) -> Result<Box<dyn GeodeticDatum>, FactoryError>;
    fn create_vertical_datum(&self, code: &str) -> Result<Box<dyn VerticalDatum>, FactoryError>;
}

pub trait CrsAuthorityFactory {
    fn create_projected_crs(&self, code: &str) -> Result<Box<dyn ProjectedCrs>, FactoryError>;
    fn create_vertical_crs(&self, code: &str) -> Result<Box<dyn VerticalCrs>, FactoryError>;
}

pub trait CoordinateOperationAuthorityFactory {
    fn create_coordinate_operation(
        &self,
        code: &str,
    ) -> Result<Box<dyn CoordinateOperation>, FactoryError>;
}

/// The factories an implementation provides. Cases needing an absent one are
/// skipped.
#[derive(Clone, Copy, Default)]
pub struct Factories<'a> {
    pub cs: Option<&'a dyn CsAuthorityFactory>,
    pub datum: Option<&'a dyn DatumAuthorityFactory>,
    pub crs: Option<&'a dyn CrsAuthorityFactory>,
    pub operation: Option<&'a dyn CoordinateOperationAuthorityFactory>,
}

impl<'a> Factories<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    /// All four kinds served by the same object.
    pub fn all<F>(factory: &'a F) -> Self
    where
        F: CsAuthorityFactory
            + DatumAuthorityFactory
            + CrsAuthorityFactory
            + CoordinateOperationAuthorityFactory,
    {
        Self {
            cs: Some(factory),
            datum: Some(factory),
            crs: Some(factory),
            operation: Some(factory),
        }
    }

    pub fn with_cs(mut self, factory: &'a dyn CsAuthorityFactory) -> Self {
        self.cs = Some(factory);
        self
    }

    pub fn with_datum(mut self, factory: &'a dyn DatumAuthorityFactory) -> Self {
        self.datum = Some(factory);
        self
    }

    pub fn with_crs(mut self, factory: &'a dyn CrsAuthorityFactory) -> Self {
        self.crs = Some(factory);
        self
    }

    pub fn with_operation(mut self, factory: &'a dyn CoordinateOperationAuthorityFactory) -> Self {
        self.operation = Some(factory);
        self
    }
}

impl std::fmt::Debug for Factories<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factories")
            .field("cs", &self.cs.is_some())
            .field("datum", &self.datum.is_some())
            .field("crs", &self.crs.is_some())
            .field("operation", &self.operation.is_some())
            .finish()
    }
}
