use std::collections::BTreeMap;

use super::aggregate::InputRecord;

/// Trim surrounding whitespace and uppercase.
pub fn canonicalize_text(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Maps free-text region identifiers onto canonical region names.
#[derive(Debug, Clone, PartialEq)]
pub struct Canonicalizer {
    corrections: BTreeMap<String, String>,
}

impl Canonicalizer {
    pub fn new(corrections: BTreeMap<String, String>) -> Self {
        Self { corrections }
    }

    /// Trim, uppercase, then apply the literal correction for that exact form.
    /// Identifiers without a correction pass through after trimming and
    /// uppercasing; nothing is rejected.
    pub fn canonicalize(&self, raw: &str) -> String {
        let text = canonicalize_text(raw);
        match self.corrections.get(&text) {
            Some(corrected) => corrected.clone(),
            None => text,
        }
    }

    /// Canonicalize the region of every record, keeping row count and order.
    pub fn apply(&self, records: Vec<InputRecord>) -> Vec<InputRecord> {
        records
            .into_iter()
            .map(|record| InputRecord {
                region: self.canonicalize(&record.region),
                ..record
            })
            .collect()
    }
}
