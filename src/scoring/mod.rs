pub mod aggregate;
pub mod canonical;
pub mod category;
pub mod config;
pub mod engine;
pub mod validation;

pub use aggregate::{aggregate, extract_records, InputRecord, RegionAggregate};
pub use canonical::{canonicalize_text, Canonicalizer};
pub use category::{Category, CategoryValues};
pub use config::*;
pub use engine::{
    normalize_and_weight, rescale, safe_ratio, score_regions, ResultRow, ScoreBreakdown,
    WeightedRegion,
};
pub use validation::{required_columns, validate_schema, validate_scoring, REGION_COLUMN};
