use std::fmt;
use thiserror::Error;

/// One or more required columns are absent from the input table.
///
/// Carries every missing name, in the order the required columns were listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub missing: Vec<String>,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing required columns: [")?;
        for (i, name) in self.missing.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}'", name)?;
        }
        write!(f, "]")
    }
}

impl std::error::Error for SchemaError {}

#[derive(Error, Debug)]
pub enum RiskError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row {row}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid scoring configuration: {}", .0.join("; "))]
    Config(Vec<String>),
}

pub type Result<T> = std::result::Result<T, RiskError>;
