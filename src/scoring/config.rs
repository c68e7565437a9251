use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::{Category, CategoryValues};

/// Default share of the external composite index carried by this dataset.
pub const DEFAULT_CONTRIBUTION_FACTOR: f64 = 0.20;

/// Scoring configuration as written in the config file.
///
/// Every field is optional; anything left out falls back to the built-in
/// defaults when the configuration is resolved.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   weights:
///     Rape: 5.0
///     "K&A": 4.0
///   corrections:
///     "NCT OF DELHI": "DELHI"
///   contribution_factor: 0.2
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Per-category weights; categories not listed keep their default weight
    #[serde(default)]
    pub weights: Option<BTreeMap<Category, f64>>,

    /// Region-name corrections merged over the default correction map.
    /// Keys and values are canonical (trimmed, uppercase) region names.
    #[serde(default)]
    pub corrections: Option<BTreeMap<String, String>>,

    /// Multiplier turning the 0-100 risk score into a contribution (default: 0.2)
    #[serde(default)]
    pub contribution_factor: Option<f64>,
}

impl ScoringConfig {
    /// Merge the configured values over the defaults.
    pub fn resolve(&self) -> ScoringParams {
        let mut weights = default_weights();
        if let Some(ref overrides) = self.weights {
            for (category, weight) in overrides {
                weights[*category] = *weight;
            }
        }

        let mut corrections = default_corrections();
        if let Some(ref extra) = self.corrections {
            corrections.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        ScoringParams {
            weights,
            corrections,
            contribution_factor: self
                .contribution_factor
                .unwrap_or(DEFAULT_CONTRIBUTION_FACTOR),
        }
    }
}

/// Resolved, immutable scoring parameters handed to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringParams {
    pub weights: CategoryValues<f64>,
    pub corrections: BTreeMap<String, String>,
    pub contribution_factor: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        ScoringConfig::default().resolve()
    }
}

/// Relative severity weights applied after per-category normalization.
pub fn default_weights() -> CategoryValues<f64> {
    CategoryValues::from_fn(|category| match category {
        Category::Rape => 5.0,
        Category::WomenTrafficking => 4.5,
        Category::KidnapAssault => 4.0,
        Category::AssaultOnModesty => 3.5,
        Category::AssaultOnWomen => 3.0,
    })
}

/// Known non-standard spellings, keyed by their trimmed uppercase form.
///
/// `LAKSHADWEEP` maps to itself and is kept as a no-op entry.
pub fn default_corrections() -> BTreeMap<String, String> {
    [
        ("A & N ISLANDS", "ANDAMAN AND NICOBAR ISLANDS"),
        ("D & N HAVELI", "DADRA AND NAGAR HAVELI"),
        ("DAMAN & DIU", "DAMAN AND DIU"),
        ("LAKSHADWEEP", "LAKSHADWEEP"),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ScoringParams::default();

        assert_eq!(params.weights[Category::Rape], 5.0);
        assert_eq!(params.weights[Category::WomenTrafficking], 4.5);
        assert_eq!(params.weights[Category::KidnapAssault], 4.0);
        assert_eq!(params.weights[Category::AssaultOnModesty], 3.5);
        assert_eq!(params.weights[Category::AssaultOnWomen], 3.0);
        assert_eq!(params.contribution_factor, 0.20);
        assert_eq!(params.corrections.len(), 4);
        assert_eq!(
            params.corrections.get("A & N ISLANDS").map(String::as_str),
            Some("ANDAMAN AND NICOBAR ISLANDS")
        );
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
weights:
  Rape: 2.0
  "K&A": 1.5
contribution_factor: 0.5
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let params = config.resolve();

        assert_eq!(params.weights[Category::Rape], 2.0);
        assert_eq!(params.weights[Category::KidnapAssault], 1.5);
        // Unlisted categories keep their defaults
        assert_eq!(params.weights[Category::WomenTrafficking], 4.5);
        assert_eq!(params.contribution_factor, 0.5);
        assert!(config.corrections.is_none());
    }

    #[test]
    fn test_corrections_merge_over_defaults() {
        let yaml = r#"
corrections:
  "NCT OF DELHI": "DELHI"
  "DAMAN & DIU": "DAMAN AND DIU UT"
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let params = config.resolve();

        assert_eq!(params.corrections.len(), 5);
        assert_eq!(params.corrections["NCT OF DELHI"], "DELHI");
        assert_eq!(params.corrections["DAMAN & DIU"], "DAMAN AND DIU UT");
        assert_eq!(params.corrections["D & N HAVELI"], "DADRA AND NAGAR HAVELI");
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ScoringConfig::default());
        assert_eq!(config.resolve(), ScoringParams::default());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let yaml = r#"
weights:
  DV: 1.0
"#;
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str("base_score: 100\n");
        assert!(result.is_err());
    }
}
