//! GIGS test series implementations
//!
//! One module per concern. Series numbers follow the GIGS 2000 library
//! tests the reference tables come from.

pub mod capabilities;
pub mod lifecycle;
pub mod reference_data;
pub mod series_2001_units;
pub mod series_2003_2004_datums;
pub mod series_2008_vertical;
pub mod suite_runs;
