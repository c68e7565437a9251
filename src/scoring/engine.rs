use serde::Serialize;
use std::cmp::Ordering;

use super::aggregate::{aggregate, extract_records, RegionAggregate};
use super::canonical::Canonicalizer;
use super::category::{Category, CategoryValues};
use super::config::ScoringParams;
use super::validation::{required_columns, validate_schema};
use crate::error::Result;
use crate::table::Table;

/// Scale applied to the normalized raw score.
pub const RISK_SCALE: f64 = 100.0;

/// Per-category view of how a region's raw score was built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreBreakdown {
    /// Summed counts across all input rows for the region
    pub totals: CategoryValues<f64>,
    /// `total / max(total over regions)`, in [0, 1]
    pub normalized: CategoryValues<f64>,
    /// `weight * normalized`; these add up to the raw score
    pub weighted: CategoryValues<f64>,
}

/// A region after normalization and weighting, before rescaling.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedRegion {
    pub region: String,
    pub raw_score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Final per-region output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Raw_Dataset_Score")]
    pub raw_score: f64,
    #[serde(rename = "Dataset_Risk_0_100")]
    pub risk: f64,
    #[serde(rename = "Dataset_Contribution_20pct")]
    pub contribution: f64,
    #[serde(skip)]
    pub breakdown: ScoreBreakdown,
}

/// `numerator / denominator`, or 0 when the denominator is exactly zero.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

/// Scale each category to [0, 1] by its maximum across regions, then combine
/// the normalized values into a raw score with the given weights.
pub fn normalize_and_weight(
    aggregates: Vec<RegionAggregate>,
    weights: &CategoryValues<f64>,
) -> Vec<WeightedRegion> {
    let maxima = CategoryValues::from_fn(|category| {
        max_of(aggregates.iter().map(|a| a.totals[category]))
    });
    tracing::debug!(?maxima, "category maxima");

    aggregates
        .into_iter()
        .map(|agg| {
            let normalized = agg
                .totals
                .map(|category, total| safe_ratio(*total, maxima[category]));
            let weighted = normalized.map(|category, value| weights[category] * value);
            let raw_score = Category::ALL
                .iter()
                .fold(0.0, |sum, category| sum + weighted[*category]);

            WeightedRegion {
                region: agg.region,
                raw_score,
                breakdown: ScoreBreakdown {
                    totals: agg.totals,
                    normalized,
                    weighted,
                },
            }
        })
        .collect()
}

/// Map raw scores onto 0-100 relative to the highest raw score, derive the
/// contribution, and sort by risk descending.
///
/// Regions with equal risk keep their incoming order, which is alphabetical
/// when fed from `aggregate`.
pub fn rescale(weighted: Vec<WeightedRegion>, contribution_factor: f64) -> Vec<ResultRow> {
    let max_raw = max_of(weighted.iter().map(|w| w.raw_score));

    let mut rows: Vec<ResultRow> = weighted
        .into_iter()
        .map(|w| {
            let risk = safe_ratio(w.raw_score, max_raw) * RISK_SCALE;
            ResultRow {
                state: w.region,
                raw_score: w.raw_score,
                risk,
                contribution: risk * contribution_factor,
                breakdown: w.breakdown,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.risk.partial_cmp(&a.risk).unwrap_or(Ordering::Equal));
    rows
}

/// Run the whole pipeline over an input table.
///
/// Fails before any computation if a required column is missing.
pub fn score_regions(table: &Table, params: &ScoringParams) -> Result<Vec<ResultRow>> {
    validate_schema(table, &required_columns())?;

    let records = extract_records(table)?;
    let canonicalizer = Canonicalizer::new(params.corrections.clone());
    let records = canonicalizer.apply(records);

    let aggregates = aggregate(&records);
    tracing::debug!(
        input_rows = records.len(),
        regions = aggregates.len(),
        "aggregated records by region"
    );

    let weighted = normalize_and_weight(aggregates, &params.weights);
    let rows = rescale(weighted, params.contribution_factor);

    if let Some(top) = rows.first() {
        tracing::info!(region = %top.state, raw_score = top.raw_score, "highest risk region");
    }
    Ok(rows)
}
