use std::collections::BTreeMap;

use super::category::{Category, CategoryValues};
use super::validation::REGION_COLUMN;
use crate::error::{Result, RiskError};
use crate::table::Table;

/// One input row: a region identifier and its category counts.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    pub region: String,
    pub counts: CategoryValues<f64>,
}

/// Summed category counts for one canonical region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAggregate {
    pub region: String,
    pub totals: CategoryValues<f64>,
}

/// Pull the region and category cells out of every row.
///
/// The table must already have passed schema validation. Extra columns are
/// ignored; a category cell that does not parse as a number is reported with
/// its 1-based data row.
pub fn extract_records(table: &Table) -> Result<Vec<InputRecord>> {
    let region_idx = column(table, REGION_COLUMN)?;
    let category_idx = Category::ALL
        .iter()
        .map(|c| column(table, c.column()))
        .collect::<Result<Vec<_>>>()?;

    table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut counts = CategoryValues::default();
            for (category, &idx) in Category::ALL.iter().zip(&category_idx) {
                let cell = cell_at(row, idx).trim();
                counts[*category] = cell.parse::<f64>().map_err(|_| RiskError::InvalidNumber {
                    row: i + 1,
                    column: category.column().to_string(),
                    value: cell.to_string(),
                })?;
            }
            Ok(InputRecord {
                region: cell_at(row, region_idx).to_string(),
                counts,
            })
        })
        .collect()
}

fn cell_at(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

fn column(table: &Table, name: &str) -> Result<usize> {
    table.column_index(name).ok_or_else(|| {
        crate::error::SchemaError {
            missing: vec![name.to_string()],
        }
        .into()
    })
}

/// Sum each category per region, one output row per distinct region.
/// Rows come out ordered by region name.
pub fn aggregate(records: &[InputRecord]) -> Vec<RegionAggregate> {
    let mut groups: BTreeMap<&str, CategoryValues<f64>> = BTreeMap::new();

    for record in records {
        let totals = groups.entry(record.region.as_str()).or_default();
        for (category, count) in record.counts.iter() {
            totals[category] += count;
        }
    }

    groups
        .into_iter()
        .map(|(region, totals)| RegionAggregate {
            region: region.to_string(),
            totals,
        })
        .collect()
}
