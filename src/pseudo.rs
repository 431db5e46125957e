//! An authority factory answering from the reference tables themselves.
//!
//! Every object it creates matches its table row, so a run against it must
//! pass everywhere. It is the baseline the harness is tested with, and a
//! template for wiring a real implementation into [`Factories`].
//!
//! [`Factories`]: crate::referencing::Factories

use anyhow::Context;
use indexmap::IndexMap;

use crate::data::{Dataset, TableCache};
use crate::error::{DataError, FactoryError};
use crate::referencing::model::{
    DefaultCartesianCs, DefaultCoordinateOperation, DefaultEllipsoid, DefaultGeodeticDatum,
    DefaultGeographicCrs, DefaultOperationMethod, DefaultPrimeMeridian, DefaultProjectedCrs,
    DefaultUnit, DefaultVerticalCrs, DefaultVerticalDatum, ObjectProperties, UnitScale,
};
use crate::referencing::{
    BaseUnit, CoordinateOperation, CoordinateOperationAuthorityFactory, CrsAuthorityFactory,
    CsAuthorityFactory, DatumAuthorityFactory, EPSG, Ellipsoid, GeodeticDatum, OperationKind,
    PrimeMeridian, ProjectedCrs, Unit, VerticalCrs, VerticalDatum,
};
use crate::series;
use crate::verify::{EllipsoidDescriptor, UnitDescriptor};

/// Objects keyed by EPSG code, in table order.
#[derive(Debug, Clone, Default)]
pub struct PseudoEpsgFactory {
    pub units: IndexMap<i32, DefaultUnit>,
    pub ellipsoids: IndexMap<i32, DefaultEllipsoid>,
    pub prime_meridians: IndexMap<i32, DefaultPrimeMeridian>,
    pub geodetic_datums: IndexMap<i32, DefaultGeodeticDatum>,
    pub projected_crs: IndexMap<i32, DefaultProjectedCrs>,
    pub vertical_datums: IndexMap<i32, DefaultVerticalDatum>,
    pub vertical_crs: IndexMap<i32, DefaultVerticalCrs>,
    pub operations: IndexMap<i32, DefaultCoordinateOperation>,
}

fn unit(descriptor: &UnitDescriptor) -> DefaultUnit {
    let scale = if descriptor.is_sexagesimal() {
        UnitScale::Sexagesimal
    } else {
        UnitScale::Linear(descriptor.unit_to_base)
    };
    DefaultUnit::new(
        ObjectProperties::epsg(descriptor.code, &descriptor.name),
        descriptor.base_unit(),
        scale,
    )
}

/// The axis unit is looked up by name among the known units, keeping its
/// identifier; otherwise it is an unidentified unit with the row's factor.
fn ellipsoid(
    descriptor: &EllipsoidDescriptor,
    units_by_name: &IndexMap<String, ObjectProperties>,
) -> DefaultEllipsoid {
    let properties = match units_by_name.get(&descriptor.axis_unit_name) {
        Some(properties) => properties.clone(),
        None => ObjectProperties {
            name: Some(descriptor.axis_unit_name.clone()),
            ..Default::default()
        },
    };
    let axis_unit = DefaultUnit::new(properties, BaseUnit::Metre, UnitScale::Linear(descriptor.to_metres));
    let properties = ObjectProperties::epsg(descriptor.code, &descriptor.name)
        .with_aliases(descriptor.aliases.iter().cloned());
    if descriptor.inverse_flattening.is_nan() {
        DefaultEllipsoid::from_semi_minor_axis(
            properties,
            descriptor.semi_major_axis,
            descriptor.semi_minor_axis,
            Some(axis_unit),
        )
    } else {
        DefaultEllipsoid::from_inverse_flattening(
            properties,
            descriptor.semi_major_axis,
            descriptor.inverse_flattening,
            Some(axis_unit),
        )
    }
}

fn dependency<'m, T>(
    map: &'m IndexMap<i32, T>,
    field: &'static str,
    code: i32,
) -> Result<&'m T, DataError> {
    map.get(&code).ok_or_else(|| DataError::UnknownValue {
        field,
        value: code.to_string(),
    })
}

impl PseudoEpsgFactory {
    /// Builds every object from `cache`. Fails if a table is corrupt or a row
    /// references a code no other table defines.
    pub fn from_tables(cache: &TableCache) -> anyhow::Result<Self> {
        let mut factory = Self::default();

        let units = series::unit_descriptors(cache).with_context(|| format!("loading {}", Dataset::Units))?;
        let mut units_by_name = IndexMap::with_capacity(units.len());
        for d in &units {
            let built = unit(d);
            units_by_name.insert(d.name.clone(), built.properties.clone());
            factory.units.insert(d.code, built);
        }

        let ellipsoids =
            series::ellipsoid_descriptors(cache).with_context(|| format!("loading {}", Dataset::Ellipsoids))?;
        for d in &ellipsoids {
            factory.ellipsoids.insert(d.code, ellipsoid(d, &units_by_name));
        }

        let meridians = series::prime_meridian_descriptors(cache)
            .with_context(|| format!("loading {}", Dataset::PrimeMeridians))?;
        for d in meridians {
            factory.prime_meridians.insert(
                d.code,
                DefaultPrimeMeridian {
                    properties: ObjectProperties::epsg(d.code, d.name).with_aliases(d.aliases),
                    greenwich_longitude: d.greenwich_longitude,
                    angular_unit: Some(DefaultUnit::degree()),
                },
            );
        }

        let datums = series::geodetic_datum_descriptors(cache)
            .with_context(|| format!("loading {}", Dataset::GeodeticDatums))?;
        for d in datums {
            let ellipsoid = dependency(&factory.ellipsoids, "ellipsoid code", d.ellipsoid_code)
                .with_context(|| format!("geodetic datum {}", d.code))?
                .clone();
            let prime_meridian =
                dependency(&factory.prime_meridians, "prime meridian code", d.prime_meridian_code)
                    .with_context(|| format!("geodetic datum {}", d.code))?
                    .clone();
            factory.geodetic_datums.insert(
                d.code,
                DefaultGeodeticDatum {
                    properties: ObjectProperties::epsg(d.code, d.name).with_aliases(d.aliases),
                    ellipsoid: Some(ellipsoid),
                    prime_meridian: Some(prime_meridian),
                },
            );
        }

        let projections = series::conversion_descriptors(cache)
            .with_context(|| format!("loading {}", Dataset::Projections))?;
        for d in projections {
            factory.operations.insert(
                d.code,
                DefaultCoordinateOperation {
                    properties: ObjectProperties::epsg(d.code, d.name),
                    kind: OperationKind::Conversion,
                    method: Some(DefaultOperationMethod::named(d.method_name)),
                },
            );
        }

        let projected = series::projected_crs_descriptors(cache)
            .with_context(|| format!("loading {}", Dataset::ProjectedCrs))?;
        for d in projected {
            let datum = dependency(&factory.geodetic_datums, "datum code", d.datum_code)
                .with_context(|| format!("projected CRS {}", d.code))?
                .clone();
            let axes = d.axis_directions().to_vec();
            // The table only names the family of projections, e.g. `WGS 84 / UTM`.
            let name = match d.projection_names.first() {
                Some(projection) => format!("{} / {}", d.base_crs_name, projection),
                None => d.base_crs_name.clone(),
            };
            // The table names the base CRS but not its code.
            let base_crs = DefaultGeographicCrs {
                properties: ObjectProperties {
                    name: Some(d.base_crs_name),
                    ..Default::default()
                },
                datum: Some(datum),
            };
            factory.projected_crs.insert(
                d.code,
                DefaultProjectedCrs {
                    properties: ObjectProperties::epsg(d.code, name),
                    base_crs: Some(base_crs),
                    coordinate_system: Some(DefaultCartesianCs::new(axes)),
                },
            );
        }

        let transformations = series::transformation_descriptors(cache)
            .with_context(|| format!("loading {}", Dataset::Transformations))?;
        for d in transformations {
            factory.operations.insert(
                d.code,
                DefaultCoordinateOperation {
                    properties: ObjectProperties::epsg(d.code, d.name).with_aliases(d.aliases),
                    kind: OperationKind::Transformation,
                    method: Some(DefaultOperationMethod::named(d.method_name)),
                },
            );
        }

        let verticals = series::vertical_descriptors(cache)
            .with_context(|| format!("loading {}", Dataset::VerticalDatums))?;
        for d in verticals {
            // Several CRSs share a datum.
            let datum = factory
                .vertical_datums
                .entry(d.datum_code)
                .or_insert_with(|| DefaultVerticalDatum {
                    properties: ObjectProperties::epsg(d.datum_code, &d.datum_name),
                })
                .clone();
            factory.vertical_crs.insert(
                d.code,
                DefaultVerticalCrs {
                    properties: ObjectProperties::epsg(d.code, d.name).with_aliases(d.aliases),
                    datum: Some(datum),
                },
            );
        }

        tracing::info!(
            "Pseudo EPSG factory ready: {} units, {} ellipsoids, {} prime meridians, {} datums, {} projected CRSs, {} operations, {} vertical CRSs",
            factory.units.len(),
            factory.ellipsoids.len(),
            factory.prime_meridians.len(),
            factory.geodetic_datums.len(),
            factory.projected_crs.len(),
            factory.operations.len(),
            factory.vertical_crs.len()
        );
        Ok(factory)
    }

    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_tables(&TableCache::builtin())
    }
}

/// Accepts `7030` as well as `EPSG:7030`. Anything else is unknown to
/// this factory.
fn parse_code(object_type: &str, code: &str) -> Result<i32, FactoryError> {
    let trimmed = code.trim();
    let local = match trimmed.split_once(':') {
        Some((space, local)) if space.trim().eq_ignore_ascii_case(EPSG) => local.trim(),
        Some(_) => return Err(FactoryError::no_such_code(object_type, EPSG, trimmed)),
        None => trimmed,
    };
    local
        .parse()
        .map_err(|_| FactoryError::no_such_code(object_type, EPSG, trimmed))
}

fn lookup<T: Clone>(
    map: &IndexMap<i32, T>,
    object_type: &str,
    code: &str,
) -> Result<T, FactoryError> {
    let key = parse_code(object_type, code)?;
    map.get(&key)
        .cloned()
        .ok_or_else(|| FactoryError::no_such_code(object_type, EPSG, key))
}

impl CsAuthorityFactory for PseudoEpsgFactory {
    fn create_unit(&self, code: &str) -> Result<Box<dyn Unit>, FactoryError> {
        Ok(Box::new(lookup(&self.units, "Unit", code)?))
    }
}

impl DatumAuthorityFactory for PseudoEpsgFactory {
    fn create_ellipsoid(&self, code: &str) -> Result<Box<dyn Ellipsoid>, FactoryError> {
        Ok(Box::new(lookup(&self.ellipsoids, "Ellipsoid", code)?))
    }

    fn create_prime_meridian(&self, code: &str) -> Result<Box<dyn PrimeMeridian>, FactoryError> {
        Ok(Box::new(lookup(&self.prime_meridians, "PrimeMeridian", code)?))
    }

    fn create_geodetic_datum(&self, code: &str) -> Result<Box<dyn GeodeticDatum>, FactoryError> {
        Ok(Box::new(lookup(&self.geodetic_datums, "GeodeticDatum", code)?))
    }

    fn create_vertical_datum(&self, code: &str) -> Result<Box<dyn VerticalDatum>, FactoryError> {
        Ok(Box::new(lookup(&self.vertical_datums, "VerticalDatum", code)?))
    }
}

impl CrsAuthorityFactory for PseudoEpsgFactory {
    fn create_projected_crs(&self, code: &str) -> Result<Box<dyn ProjectedCrs>, FactoryError> {
        Ok(Box::new(lookup(&self.projected_crs, "ProjectedCRS", code)?))
    }

    fn create_vertical_crs(&self, code: &str) -> Result<Box<dyn VerticalCrs>, FactoryError> {
        Ok(Box::new(lookup(&self.vertical_crs, "VerticalCRS", code)?))
    }
}

impl CoordinateOperationAuthorityFactory for PseudoEpsgFactory {
    fn create_coordinate_operation(
        &self,
        code: &str,
    ) -> Result<Box<dyn CoordinateOperation>, FactoryError> {
        Ok(Box::new(lookup(&self.operations, "CoordinateOperation", code)?))
    }
}
