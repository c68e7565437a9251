use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use crate::scoring::ResultRow;

/// Result file header, in column order
pub const RESULT_COLUMNS: [&str; 4] = [
    "State",
    "Raw_Dataset_Score",
    "Dataset_Risk_0_100",
    "Dataset_Contribution_20pct",
];

/// Serialize result rows as CSV with a header row.
pub fn write_results<W: Write>(writer: W, rows: &[ResultRow]) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        // serde only emits the header alongside the first record
        csv_writer.write_record(RESULT_COLUMNS)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the result CSV to a file atomically
///
/// Uses atomic-write-file so a failed run never leaves a partial result file.
pub fn save_results(path: &Path, rows: &[ResultRow]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    write_results(&mut file, rows).context("Failed to serialize results")?;

    file.commit()
        .with_context(|| format!("Failed to save results to {}", path.display()))?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote result file");
    Ok(())
}
