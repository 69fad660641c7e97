//! Sweep report writer.
//!
//! Renders a [`SweepMatrix`] as CSV: a header row of slot-count column
//! groups and one body row per hash count, four cells per group:
//!
//! ```text
//! K \ M, 64,  ,  ,  , 256,  ,  ,  , ...
//! 1,     b1, b2, b3, fp, b1, b2, b3, fp, ...
//! 2,     ...
//! ```
//!
//! where b1..b3 are bits set after the first three hashing passes and fp is
//! the observed false-positive count. No domain logic lives here; the matrix
//! arrives finished.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::sweep::SweepMatrix;

/// Errors while writing the report file.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("report io failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the sweep matrix to `path` as CSV.
pub fn write_report(path: &Path, matrix: &SweepMatrix) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = Vec::with_capacity(matrix.slot_counts.len() * 4 + 1);
    header.push("K \\ M".to_string());
    for &slot_count in &matrix.slot_counts {
        header.push(slot_count.to_string());
        header.push(String::new());
        header.push(String::new());
        header.push(String::new());
    }
    writer.write_record(&header)?;

    for (ki, &hash_count) in matrix.hash_counts.iter().enumerate() {
        let mut body = Vec::with_capacity(matrix.slot_counts.len() * 4 + 1);
        body.push(hash_count.to_string());
        for column in &matrix.cells {
            let cell = &column[ki];
            body.push(cell.bits_after_pass[0].to_string());
            body.push(cell.bits_after_pass[1].to_string());
            body.push(cell.bits_after_pass[2].to_string());
            body.push(cell.false_positives.to_string());
        }
        writer.write_record(&body)?;
    }

    writer.flush()?;
    info!(path = %path.display(), "Sweep report written");
    Ok(())
}
