//! Table-driven runs: every row of a reference table becomes an expected
//! descriptor, and every descriptor one verification case.

use indexmap::IndexMap;
use std::fmt;

use crate::case::{CaseContext, Outcome};
use crate::data::{Dataset, ExpectedData, TableCache};
use crate::error::DataResult;
use crate::referencing::Factories;
use crate::verify::{
    ConversionDescriptor, EllipsoidDescriptor, GeodeticDatumDescriptor, PrimeMeridianDescriptor,
    ProjectedCrsDescriptor, TransformationDescriptor, UnitDescriptor, UnitKind,
    VerticalCrsDescriptor, verify_conversion, verify_ellipsoid, verify_geodetic_datum,
    verify_prime_meridian, verify_projected_crs, verify_transformation, verify_unit,
    verify_vertical,
};

fn read_rows<T, F>(cache: &TableCache, dataset: Dataset, read: F) -> DataResult<Vec<T>>
where
    F: Fn(&ExpectedData) -> DataResult<T>,
{
    let mut data = cache.cursor(dataset)?;
    let mut rows = Vec::with_capacity(data.table().len());
    while data.advance() {
        rows.push(read(&data)?);
    }
    Ok(rows)
}

pub fn unit_descriptors(cache: &TableCache) -> DataResult<Vec<UnitDescriptor>> {
    read_rows(cache, Dataset::Units, |data| {
        Ok(UnitDescriptor {
            code: data.get_int(0)?,
            kind: data.get_string(1)?.parse::<UnitKind>()?,
            name: data.get_string(2)?.to_string(),
            aliases: Vec::new(),
            unit_to_base: data.get_double(3)?,
            important: data.get_boolean(4)?,
        })
    })
}

/// Also cross-checks each row's semi-major axis in metres.
pub fn ellipsoid_descriptors(cache: &TableCache) -> DataResult<Vec<EllipsoidDescriptor>> {
    read_rows(cache, Dataset::Ellipsoids, |data| {
        let descriptor = EllipsoidDescriptor {
            code: data.get_int(0)?,
            important: data.get_boolean(1)?,
            name: data.get_string(2)?.to_string(),
            aliases: data.get_string_list(3)?,
            semi_major_axis: data.get_double(4)?,
            axis_unit_name: data.get_string(5)?.to_string(),
            to_metres: data.get_double(6)?,
            semi_major_in_metres: data.get_double(7)?,
            inverse_flattening: data.get_double(8)?,
            semi_minor_axis: data.get_double(9)?,
            is_sphere: data.get_boolean(10)?,
        };
        descriptor.check_consistency()?;
        Ok(descriptor)
    })
}

pub fn prime_meridian_descriptors(cache: &TableCache) -> DataResult<Vec<PrimeMeridianDescriptor>> {
    read_rows(cache, Dataset::PrimeMeridians, |data| {
        Ok(PrimeMeridianDescriptor {
            code: data.get_int(0)?,
            important: data.get_boolean(1)?,
            name: data.get_string(2)?.to_string(),
            aliases: data.get_string_list(3)?,
            greenwich_longitude: data.get_double(4)?,
        })
    })
}

pub fn geodetic_datum_descriptors(cache: &TableCache) -> DataResult<Vec<GeodeticDatumDescriptor>> {
    read_rows(cache, Dataset::GeodeticDatums, |data| {
        Ok(GeodeticDatumDescriptor {
            code: data.get_int(0)?,
            important: data.get_boolean(1)?,
            name: data.get_string(2)?.to_string(),
            aliases: data.get_string_list(3)?,
            ellipsoid_code: data.get_int(4)?,
            ellipsoid_name: data.get_string(5)?.to_string(),
            prime_meridian_code: data.get_int(6)?,
            prime_meridian_name: data.get_string(7)?.to_string(),
        })
    })
}

pub fn conversion_descriptors(cache: &TableCache) -> DataResult<Vec<ConversionDescriptor>> {
    read_rows(cache, Dataset::Projections, |data| {
        Ok(ConversionDescriptor {
            code: data.get_int(0)?,
            important: data.get_boolean(1)?,
            name: data.get_string(2)?.to_string(),
            projection_group: data.get_string(3)?.to_string(),
            method_name: data.get_string(4)?.to_string(),
            deprecated: data.get_boolean(5)?,
        })
    })
}

pub fn projected_crs_descriptors(cache: &TableCache) -> DataResult<Vec<ProjectedCrsDescriptor>> {
    read_rows(cache, Dataset::ProjectedCrs, |data| {
        Ok(ProjectedCrsDescriptor {
            code: data.get_int(0)?,
            important: data.get_boolean(1)?,
            base_crs_name: data.get_string(2)?.to_string(),
            datum_code: data.get_int(3)?,
            projection_names: data.get_string_list(4)?,
            north_axis_first: data.get_boolean(5)?,
            west_orientated: data.get_boolean(6)?,
            south_orientated: data.get_boolean(7)?,
        })
    })
}

pub fn transformation_descriptors(cache: &TableCache) -> DataResult<Vec<TransformationDescriptor>> {
    read_rows(cache, Dataset::Transformations, |data| {
        Ok(TransformationDescriptor {
            code: data.get_int(0)?,
            important: data.get_boolean(1)?,
            name: data.get_string(2)?.to_string(),
            aliases: data.get_string_list(3)?,
            method_name: data.get_string(4)?.to_string(),
        })
    })
}

pub fn vertical_descriptors(cache: &TableCache) -> DataResult<Vec<VerticalCrsDescriptor>> {
    read_rows(cache, Dataset::VerticalDatums, |data| {
        Ok(VerticalCrsDescriptor {
            code: data.get_int(0)?,
            important: data.get_boolean(1)?,
            name: data.get_string(2)?.to_string(),
            aliases: data.get_string_list(3)?,
            datum_code: data.get_int(4)?,
            datum_name: data.get_string(5)?.to_string(),
        })
    })
}

/// The outcome of one row.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    pub dataset: Dataset,
    pub code: i32,
    pub name: String,
    pub important: bool,
    pub outcome: Outcome,
}

impl fmt::Display for CaseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{} {}: {}", self.code, self.name, self.outcome)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of<'r>(records: impl IntoIterator<Item = &'r CaseRecord>) -> Self {
        let mut summary = Summary::default();
        for record in records {
            match record.outcome {
                Outcome::Passed => summary.passed += 1,
                Outcome::Skipped(_) => summary.skipped += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.passed + self.skipped + self.failed
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} skipped, {} failed",
            self.passed, self.skipped, self.failed
        )
    }
}

/// Runs reference tables against a set of factories.
#[derive(Debug, Clone, Copy)]
pub struct Suite<'a> {
    cache: &'a TableCache,
    factories: Factories<'a>,
    context: CaseContext<'a>,
}

impl<'a> Suite<'a> {
    pub fn new(cache: &'a TableCache, factories: Factories<'a>, context: CaseContext<'a>) -> Self {
        Self {
            cache,
            factories,
            context,
        }
    }

    fn record<D>(
        &self,
        dataset: Dataset,
        descriptors: Vec<D>,
        describe: impl Fn(&D) -> (i32, String, bool),
        verify: impl Fn(&Factories<'a>, CaseContext<'a>, D) -> Outcome,
    ) -> Vec<CaseRecord> {
        descriptors
            .into_iter()
            .map(|descriptor| {
                let (code, name, important) = describe(&descriptor);
                let outcome = verify(&self.factories, self.context, descriptor);
                CaseRecord {
                    dataset,
                    code,
                    name,
                    important,
                    outcome,
                }
            })
            .collect()
    }

    /// One record per row of `dataset`, in file order.
    pub fn run(&self, dataset: Dataset) -> DataResult<Vec<CaseRecord>> {
        let cache = self.cache;
        let records = match dataset {
            Dataset::Units => self.record(
                dataset,
                unit_descriptors(cache)?,
                |d| (d.code, d.name.clone(), d.important),
                verify_unit,
            ),
            Dataset::Ellipsoids => self.record(
                dataset,
                ellipsoid_descriptors(cache)?,
                |d| (d.code, d.name.clone(), d.important),
                verify_ellipsoid,
            ),
            Dataset::PrimeMeridians => self.record(
                dataset,
                prime_meridian_descriptors(cache)?,
                |d| (d.code, d.name.clone(), d.important),
                verify_prime_meridian,
            ),
            Dataset::GeodeticDatums => self.record(
                dataset,
                geodetic_datum_descriptors(cache)?,
                |d| (d.code, d.name.clone(), d.important),
                verify_geodetic_datum,
            ),
            Dataset::Projections => self.record(
                dataset,
                conversion_descriptors(cache)?,
                |d| (d.code, d.name.clone(), d.important),
                verify_conversion,
            ),
            Dataset::ProjectedCrs => self.record(
                dataset,
                projected_crs_descriptors(cache)?,
                |d| (d.code, d.base_crs_name.clone(), d.important),
                verify_projected_crs,
            ),
            Dataset::Transformations => self.record(
                dataset,
                transformation_descriptors(cache)?,
                |d| (d.code, d.name.clone(), d.important),
                verify_transformation,
            ),
            Dataset::VerticalDatums => self.record(
                dataset,
                vertical_descriptors(cache)?,
                |d| (d.code, d.name.clone(), d.important),
                verify_vertical,
            ),
        };
        tracing::info!("{}: {}", dataset, Summary::of(&records));
        Ok(records)
    }

    pub fn run_all(&self) -> DataResult<IndexMap<Dataset, Vec<CaseRecord>>> {
        Dataset::ALL
            .iter()
            .map(|&dataset| Ok((dataset, self.run(dataset)?)))
            .collect()
    }
}
