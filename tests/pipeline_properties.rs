use proptest::prelude::*;
use region_risk::scoring::{
    aggregate, default_corrections, default_weights, normalize_and_weight, rescale,
    validate_scoring, Canonicalizer, Category, CategoryValues, InputRecord, RegionAggregate,
    ScoringConfig,
};
use std::collections::BTreeMap;
use region_risk::{score_regions, ScoringParams, Table};

// Mixes default correction keys and targets with plain names
const CANONICAL_NAMES: [&str; 8] = [
    "A & N ISLANDS",
    "ANDAMAN AND NICOBAR ISLANDS",
    "D & N HAVELI",
    "DAMAN AND DIU",
    "LAKSHADWEEP",
    "DELHI",
    "NCT OF DELHI",
    "GOA",
];

const REGIONS: [&str; 6] = ["Goa", " goa", "KERALA", "A & N Islands", "a & n islands ", "Bihar"];

fn counts() -> impl Strategy<Value = [u32; 5]> {
    prop::array::uniform5(0u32..500)
}

fn to_values(v: [u32; 5]) -> CategoryValues<f64> {
    let mut values = CategoryValues::default();
    for (category, count) in Category::ALL.iter().zip(v) {
        values[*category] = count as f64;
    }
    values
}

fn user_corrections() -> impl Strategy<Value = BTreeMap<String, String>> {
    let name = || (0..CANONICAL_NAMES.len()).prop_map(|i| CANONICAL_NAMES[i].to_string());
    prop::collection::btree_map(name(), name(), 0..5)
}

fn records() -> impl Strategy<Value = Vec<InputRecord>> {
    prop::collection::vec((0..REGIONS.len(), counts()), 1..30).prop_map(|rows| {
        rows.into_iter()
            .map(|(r, v)| InputRecord {
                region: REGIONS[r].to_string(),
                counts: to_values(v),
            })
            .collect()
    })
}

fn aggregates() -> impl Strategy<Value = Vec<RegionAggregate>> {
    prop::collection::vec(counts(), 1..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, v)| RegionAggregate {
                region: format!("REGION {:02}", i),
                totals: to_values(v),
            })
            .collect()
    })
}

fn input_table(rows: &[(&str, [u32; 5])]) -> Table {
    let headers = ["State", "Year", "Rape", "K&A", "DD", "AoW", "AoM", "DV", "WT"];
    Table::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|(state, [rape, wt, ka, aom, aow])| {
                vec![
                    state.to_string(),
                    "2001".to_string(),
                    rape.to_string(),
                    ka.to_string(),
                    "0".to_string(),
                    aow.to_string(),
                    aom.to_string(),
                    "0".to_string(),
                    wt.to_string(),
                ]
            })
            .collect(),
    )
}

proptest! {
    #[test]
    fn canonicalize_is_idempotent(raw in "[ a-zA-Z&]{0,24}") {
        let canonicalizer = Canonicalizer::new(default_corrections());
        let once = canonicalizer.canonicalize(&raw);
        prop_assert_eq!(canonicalizer.canonicalize(&once), once);
    }

    #[test]
    fn accepted_user_corrections_keep_canonicalize_idempotent(
        corrections in user_corrections(),
        raw in prop::sample::select(CANONICAL_NAMES.to_vec()),
        padded in any::<bool>(),
    ) {
        let config = ScoringConfig {
            corrections: Some(corrections),
            ..Default::default()
        };
        if validate_scoring(&config).is_err() {
            return Ok(());
        }

        let input = if padded { format!("  {} ", raw.to_lowercase()) } else { raw.to_string() };
        let canonicalizer = Canonicalizer::new(config.resolve().corrections);
        let once = canonicalizer.canonicalize(&input);
        prop_assert_eq!(canonicalizer.canonicalize(&once), once);
    }

    #[test]
    fn aggregation_ignores_row_order(records in records()) {
        let canonicalizer = Canonicalizer::new(default_corrections());
        let canonical = canonicalizer.apply(records);
        let mut reversed = canonical.clone();
        reversed.reverse();

        prop_assert_eq!(aggregate(&canonical), aggregate(&reversed));
    }

    #[test]
    fn normalized_values_within_unit_interval(aggregates in aggregates()) {
        let weighted = normalize_and_weight(aggregates.clone(), &default_weights());

        for category in Category::ALL {
            let max = aggregates.iter().map(|a| a.totals[category]).fold(0.0, f64::max);
            for region in &weighted {
                let value = region.breakdown.normalized[category];
                prop_assert!((0.0..=1.0).contains(&value));
                if max == 0.0 {
                    prop_assert_eq!(value, 0.0);
                }
            }
        }
    }

    #[test]
    fn raw_score_monotonic_in_region_counts(
        aggregates in aggregates(),
        pick in any::<prop::sample::Index>(),
        category_idx in 0usize..5,
        bump in 1u32..200,
    ) {
        let target = pick.index(aggregates.len());
        let category = Category::ALL[category_idx];

        let before = normalize_and_weight(aggregates.clone(), &default_weights());
        let mut bumped = aggregates;
        bumped[target].totals[category] += bump as f64;
        let after = normalize_and_weight(bumped, &default_weights());

        prop_assert!(after[target].raw_score >= before[target].raw_score - 1e-9);
    }

    #[test]
    fn rescaled_scores_bounded_and_sorted(aggregates in aggregates()) {
        let rows = rescale(normalize_and_weight(aggregates, &default_weights()), 0.20);

        for row in &rows {
            prop_assert!((0.0..=100.0).contains(&row.risk));
            prop_assert!((row.contribution - row.risk * 0.20).abs() < 1e-9);
        }
        for pair in rows.windows(2) {
            prop_assert!(pair[0].risk >= pair[1].risk);
        }
        if rows.iter().any(|r| r.raw_score > 0.0) {
            prop_assert_eq!(rows[0].risk, 100.0);
        }
    }
}

#[test]
fn test_end_to_end_two_regions() {
    let table = input_table(&[("X", [10, 0, 0, 0, 0]), ("Y", [0, 10, 0, 0, 0])]);
    let rows = score_regions(&table, &ScoringParams::default()).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].state, "X");
    assert!((rows[0].raw_score - 5.0).abs() < 1e-9);
    assert!((rows[0].risk - 100.0).abs() < 1e-9);
    assert!((rows[0].contribution - 20.0).abs() < 1e-9);
    assert_eq!(rows[1].state, "Y");
    assert!((rows[1].raw_score - 4.5).abs() < 1e-9);
    assert!((rows[1].risk - 90.0).abs() < 1e-9);
    assert!((rows[1].contribution - 18.0).abs() < 1e-9);
}

#[test]
fn test_spelling_variants_aggregate_together() {
    let table = input_table(&[
        ("A & N Islands", [1, 2, 3, 4, 5]),
        ("a & n islands ", [10, 20, 30, 40, 50]),
    ]);
    let rows = score_regions(&table, &ScoringParams::default()).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].state, "ANDAMAN AND NICOBAR ISLANDS");
    let totals = &rows[0].breakdown.totals;
    let sums: Vec<f64> = Category::ALL.iter().map(|c| totals[*c]).collect();
    assert_eq!(sums, vec![11.0, 22.0, 33.0, 44.0, 55.0]);
}

#[test]
fn test_custom_weights_change_ranking() {
    let table = input_table(&[("X", [10, 0, 0, 0, 0]), ("Y", [0, 10, 0, 0, 0])]);
    let mut params = ScoringParams::default();
    params.weights[Category::WomenTrafficking] = 10.0;

    let rows = score_regions(&table, &params).unwrap();
    assert_eq!(rows[0].state, "Y");
    assert!((rows[1].risk - 50.0).abs() < 1e-9);
}

#[test]
fn test_all_zero_counts_score_zero() {
    let table = input_table(&[("X", [0; 5]), ("Y", [0; 5])]);
    let rows = score_regions(&table, &ScoringParams::default()).unwrap();

    assert!(rows.iter().all(|r| r.raw_score == 0.0 && r.risk == 0.0 && r.contribution == 0.0));
    // Ties keep alphabetical order
    assert_eq!(rows[0].state, "X");
    assert_eq!(rows[1].state, "Y");
}
