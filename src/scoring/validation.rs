use super::canonical::canonicalize_text;
use super::category::Category;
use super::config::ScoringConfig;
use crate::error::SchemaError;
use crate::table::Table;

/// Column holding the free-text region identifier.
pub const REGION_COLUMN: &str = "State";

/// Columns the pipeline reads: every category, then the region column.
pub fn required_columns() -> Vec<&'static str> {
    Category::ALL
        .iter()
        .map(|c| c.column())
        .chain(std::iter::once(REGION_COLUMN))
        .collect()
}

/// Check that every required column is present in the table.
/// Reports all missing columns at once (not just the first).
pub fn validate_schema(table: &Table, required: &[&str]) -> Result<(), SchemaError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { missing })
    }
}

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref weights) = config.weights {
        for (category, weight) in weights {
            if !weight.is_finite() || *weight <= 0.0 {
                errors.push(format!(
                    "scoring.weights.{}: must be a positive number, got {}",
                    category, weight
                ));
            }
        }
    }

    if let Some(factor) = config.contribution_factor {
        if !(factor > 0.0 && factor <= 1.0) {
            errors.push(format!(
                "scoring.contribution_factor: must be in (0, 1], got {}",
                factor
            ));
        }
    }

    // Corrections must stay canonical so canonicalizing twice is a no-op
    if let Some(ref corrections) = config.corrections {
        let merged = config.resolve().corrections;
        for (from, to) in corrections {
            if from.is_empty() || to.is_empty() {
                errors.push(format!(
                    "scoring.corrections['{}']: names must not be empty",
                    from
                ));
                continue;
            }
            if canonicalize_text(from) != *from {
                errors.push(format!(
                    "scoring.corrections['{}']: key must be trimmed and uppercase",
                    from
                ));
            }
            if canonicalize_text(to) != *to {
                errors.push(format!(
                    "scoring.corrections['{}']: value '{}' must be trimmed and uppercase",
                    from, to
                ));
            }
        }

        // Chains can start or end in a default entry, so check the merged map
        for (from, to) in &merged {
            if to == from {
                continue;
            }
            if let Some(next) = merged.get(to).filter(|next| *next != to) {
                errors.push(format!(
                    "scoring.corrections['{}']: value '{}' is itself corrected to '{}'",
                    from, to, next
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
