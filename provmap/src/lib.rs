//! Province map decoding.
//!
//! Fuses a provinces bitmap (every province painted in a unique solid
//! color) with a `definition.csv` color-to-id table into an immutable
//! [`ProvinceMap`] that resolves pixel coordinates to province ids,
//! extracts per-province spatial statistics, and cross-checks dataset
//! integrity (every pixel must map to exactly one province).

pub mod color;
pub mod definition;
pub mod error;
pub mod map;
pub mod region;
pub mod validate;

// Re-export common types for a flat API
pub use color::ColorKey;
pub use definition::{ProvinceDefinitions, ProvinceId};
pub use error::{DefinitionError, MapError};
pub use map::ProvinceMap;
pub use region::ProvinceStats;
pub use validate::CoverageReport;
