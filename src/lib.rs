//! Data-driven conformance harness for geodetic authority factories.
//!
//! Reference values come from GIGS tables shipped under `data/`. Each table
//! row becomes an immutable expected descriptor; the factory under test
//! builds the matching object, which is validated and compared property by
//! property under a set of capability flags. Every case ends as passed,
//! skipped (the implementation does not support the code) or failed.
//!
//! ```no_run
//! use gigs_conformance::{
//!     CaseContext, Factories, HarnessConfig, PseudoEpsgFactory, StructuralValidator, Suite,
//!     TableCache,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = HarnessConfig::load()?;
//! let cache = TableCache::from_config(&config);
//! let factory = PseudoEpsgFactory::from_tables(&cache)?;
//! let context = CaseContext::new(config.capabilities, &StructuralValidator);
//! let results = Suite::new(&cache, Factories::all(&factory), context).run_all()?;
//! for (dataset, records) in &results {
//!     println!("{}: {} cases", dataset, records.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod case;
pub mod config;
pub mod data;
pub mod error;
pub mod pseudo;
pub mod referencing;
pub mod series;
pub mod verify;

pub use case::{ANGULAR_TOLERANCE, CaseContext, Outcome, TOLERANCE, VerificationCase};
pub use config::{Capabilities, CapabilityKey, HarnessConfig};
pub use data::{Dataset, ExpectedData, TableCache};
pub use error::{AssertionFailure, CaseError, DataError, FactoryError, SkipReason};
pub use pseudo::PseudoEpsgFactory;
pub use referencing::{Factories, StructuralValidator};
pub use series::{CaseRecord, Suite, Summary};
