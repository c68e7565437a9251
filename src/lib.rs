//! Per-region composite risk scoring over tabular crime statistics.
//!
//! Rows are validated, region names canonicalized, category counts summed per
//! region, each category scaled by its maximum, combined with fixed weights,
//! and finally rescaled to 0-100 with a derived contribution value.

pub mod config;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod output;
pub mod scoring;
pub mod table;

pub use error::{Result, RiskError, SchemaError};
pub use scoring::{score_regions, ResultRow, ScoringParams};
pub use table::Table;
