use std::path::Path;

use crate::error::{Result, RiskError};
use crate::scoring::{validate_schema, Canonicalizer, ResultRow, REGION_COLUMN};
use crate::table::Table;

const CONTRIBUTION_COLUMN: &str = "Dataset_Contribution_20pct";

/// How a query was matched to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    /// One name contains the other
    Partial,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupMatch<'a> {
    pub region: &'a str,
    pub contribution: f64,
    pub kind: MatchKind,
}

/// Region name to contribution lookup over a scored result table.
///
/// Entries keep result order (highest risk first), which decides which region
/// wins when a partial query matches several.
#[derive(Debug, Clone)]
pub struct RiskLookup {
    entries: Vec<(String, f64)>,
    canonicalizer: Canonicalizer,
}

impl RiskLookup {
    pub fn from_rows(rows: &[ResultRow], canonicalizer: Canonicalizer) -> Self {
        Self {
            entries: rows
                .iter()
                .map(|r| (r.state.clone(), r.contribution))
                .collect(),
            canonicalizer,
        }
    }

    /// Build from a previously written result file.
    pub fn from_path(path: &Path, canonicalizer: Canonicalizer) -> Result<Self> {
        let table = Table::from_path(path)?;
        validate_schema(&table, &[REGION_COLUMN, CONTRIBUTION_COLUMN])?;

        // Both columns were just validated
        let state_idx = table.column_index(REGION_COLUMN).unwrap_or_default();
        let value_idx = table.column_index(CONTRIBUTION_COLUMN).unwrap_or_default();

        let mut entries = Vec::with_capacity(table.len());
        for (i, row) in table.rows().iter().enumerate() {
            let cell = row.get(value_idx).map(|c| c.trim()).unwrap_or("");
            let contribution = cell.parse::<f64>().map_err(|_| RiskError::InvalidNumber {
                row: i + 1,
                column: CONTRIBUTION_COLUMN.to_string(),
                value: cell.to_string(),
            })?;
            let state = row.get(state_idx).cloned().unwrap_or_default();
            entries.push((state, contribution));
        }

        Ok(Self {
            entries,
            canonicalizer,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a free-text region name.
    ///
    /// The query is canonicalized first. An exact match wins; otherwise the
    /// first region where either name contains the other.
    pub fn resolve(&self, name: &str) -> Option<LookupMatch<'_>> {
        let query = self.canonicalizer.canonicalize(name);
        if query.is_empty() {
            return None;
        }

        if let Some(entry) = self.entries.iter().find(|(region, _)| *region == query) {
            return Some(Self::to_match(entry, MatchKind::Exact));
        }

        self.entries
            .iter()
            .filter(|(region, _)| !region.is_empty())
            .find(|(region, _)| query.contains(region.as_str()) || region.contains(&query))
            .map(|entry| Self::to_match(entry, MatchKind::Partial))
    }

    fn to_match(entry: &(String, f64), kind: MatchKind) -> LookupMatch<'_> {
        LookupMatch {
            region: entry.0.as_str(),
            contribution: entry.1,
            kind,
        }
    }

    /// Contribution for a region name, or 0 when nothing matches.
    pub fn contribution(&self, name: &str) -> f64 {
        self.resolve(name).map(|m| m.contribution).unwrap_or(0.0)
    }
}
