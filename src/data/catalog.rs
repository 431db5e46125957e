use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use super::{ColumnType, DataFormat, ExpectedData, ReferenceTable};
use crate::config::HarnessConfig;
use crate::error::{DataError, DataResult};

use ColumnType::{Boolean, Double, Integer, String as Text};

/// Where reference resources come from: the tables compiled into the crate,
/// optionally shadowed by files in a directory.
#[derive(Debug, Clone)]
pub struct ResourceSet {
    embedded: IndexMap<&'static str, &'static str>,
    dir: Option<PathBuf>,
}

impl ResourceSet {
    /// The GIGS tables shipped with the crate.
    pub fn builtin() -> Self {
        let embedded = Dataset::ALL
            .iter()
            .map(|d| (d.file_name(), d.embedded_text()))
            .collect();
        Self {
            embedded,
            dir: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            embedded: IndexMap::new(),
            dir: None,
        }
    }

    /// Files in `dir` take precedence over embedded resources of the same name.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_resource(mut self, name: &'static str, text: &'static str) -> Self {
        self.embedded.insert(name, text);
        self
    }

    pub fn read(&self, name: &str) -> DataResult<Cow<'static, str>> {
        if let Some(dir) = &self.dir {
            let path = dir.join(name);
            if path.is_file() {
                let text = std::fs::read_to_string(&path).map_err(|e| DataError::io(name, &e))?;
                return Ok(Cow::Owned(text));
            }
        }
        self.embedded
            .get(name)
            .map(|text| Cow::Borrowed(*text))
            .ok_or_else(|| DataError::ResourceNotFound(name.to_string()))
    }

    /// Reads and parses a resource with caller-declared column types.
    pub fn load(
        &self,
        name: &str,
        columns: &[ColumnType],
        format: &DataFormat,
    ) -> DataResult<ReferenceTable> {
        let text = self.read(name)?;
        let table = ReferenceTable::parse(name, &text, columns, format)?;
        tracing::info!(resource = name, rows = table.len(), "Loaded reference table");
        Ok(table)
    }
}

/// The reference tables known to the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Units,
    Ellipsoids,
    PrimeMeridians,
    GeodeticDatums,
    Projections,
    ProjectedCrs,
    Transformations,
    VerticalDatums,
}

impl Dataset {
    pub const COUNT: usize = 8;

    pub const ALL: [Dataset; Self::COUNT] = [
        Dataset::Units,
        Dataset::Ellipsoids,
        Dataset::PrimeMeridians,
        Dataset::GeodeticDatums,
        Dataset::Projections,
        Dataset::ProjectedCrs,
        Dataset::Transformations,
        Dataset::VerticalDatums,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::Units => "GIGS_2001_libUnit.csv",
            Dataset::Ellipsoids => "GIGS_2002_libEllipsoid.csv",
            Dataset::PrimeMeridians => "GIGS_2003_libPrimeMeridian.csv",
            Dataset::GeodeticDatums => "GIGS_2004_libGeodeticDatum.csv",
            Dataset::Projections => "GIGS_2005_libProjection.csv",
            Dataset::ProjectedCrs => "GIGS_2006_libProjectedCRS.csv",
            Dataset::Transformations => "GIGS_2007_libTransformation.csv",
            Dataset::VerticalDatums => "GIGS_2008_libVerticalDatumCRS.csv",
        }
    }

    fn embedded_text(self) -> &'static str {
        match self {
            Dataset::Units => include_str!("../../data/GIGS_2001_libUnit.csv"),
            Dataset::Ellipsoids => include_str!("../../data/GIGS_2002_libEllipsoid.csv"),
            Dataset::PrimeMeridians => include_str!("../../data/GIGS_2003_libPrimeMeridian.csv"),
            Dataset::GeodeticDatums => include_str!("../../data/GIGS_2004_libGeodeticDatum.csv"),
            Dataset::Projections => include_str!("../../data/GIGS_2005_libProjection.csv"),
            Dataset::ProjectedCrs => include_str!("../../data/GIGS_2006_libProjectedCRS.csv"),
            Dataset::Transformations => include_str!("../../data/GIGS_2007_libTransformation.csv"),
            Dataset::VerticalDatums => include_str!("../../data/GIGS_2008_libVerticalDatumCRS.csv"),
        }
    }

    /// Column types, in file order.
    pub fn columns(self) -> &'static [ColumnType] {
        match self {
            // code, type, name, base units per unit, important, remarks
            Dataset::Units => &[Integer, Text, Text, Double, Boolean, Text],
            // code, important, name, aliases, a, unit name, unit to metres,
            // a in metres, 1/f, b, sphere
            Dataset::Ellipsoids => &[
                Integer, Boolean, Text, Text, Double, Text, Double, Double, Double, Double, Boolean,
            ],
            // code, important, name, aliases, Greenwich longitude in degrees
            Dataset::PrimeMeridians => &[Integer, Boolean, Text, Text, Double],
            // code, important, name, aliases, ellipsoid code, ellipsoid name,
            // prime meridian code, prime meridian name
            Dataset::GeodeticDatums => &[Integer, Boolean, Text, Text, Integer, Text, Integer, Text],
            // code, important, name, projection group, method, deprecated
            Dataset::Projections => &[Integer, Boolean, Text, Text, Text, Boolean],
            // code, important, base CRS name, datum code, projection names,
            // north axis first, west orientated, south orientated
            Dataset::ProjectedCrs => &[Integer, Boolean, Text, Integer, Text, Boolean, Boolean, Boolean],
            // code, important, name, aliases, method
            Dataset::Transformations => &[Integer, Boolean, Text, Text, Text],
            // CRS code, important, CRS name, CRS aliases, datum code, datum name
            Dataset::VerticalDatums => &[Integer, Boolean, Text, Text, Integer, Text],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Loads each [`Dataset`] at most once and shares it read-only.
///
/// A load failure is remembered too: a corrupt table stays corrupt.
#[derive(Debug)]
pub struct TableCache {
    resources: ResourceSet,
    format: DataFormat,
    slots: [OnceLock<DataResult<Arc<ReferenceTable>>>; Dataset::COUNT],
}

impl TableCache {
    pub fn new(resources: ResourceSet, format: DataFormat) -> Self {
        Self {
            resources,
            format,
            slots: Default::default(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(ResourceSet::builtin(), DataFormat::default())
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        let mut resources = ResourceSet::builtin();
        if let Some(dir) = &config.data_dir {
            resources = resources.with_dir(dir);
        }
        Self::new(resources, config.data_format.clone())
    }

    pub fn format(&self) -> &DataFormat {
        &self.format
    }

    pub fn table(&self, dataset: Dataset) -> DataResult<Arc<ReferenceTable>> {
        self.slots[dataset.index()]
            .get_or_init(|| {
                self.resources
                    .load(dataset.file_name(), dataset.columns(), &self.format)
                    .map(Arc::new)
            })
            .clone()
    }

    /// A fresh cursor over the shared table.
    pub fn cursor(&self, dataset: Dataset) -> DataResult<ExpectedData> {
        let table = self.table(dataset)?;
        Ok(ExpectedData::with_list_separator(
            table,
            self.format.list_separator,
        ))
    }
}
