use std::path::Path;

use crate::error::{LedgerError, Result};
use crate::models::Entry;

pub(crate) const HEADER: [&str; 4] = ["date", "title", "category", "amount"];

/// Render entries as CSV, one row per entry in stored order.
pub(crate) fn entries_to_csv(entries: &[Entry]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    wtr.write_record(HEADER)?;
    for entry in entries {
        let amount = entry.amount.to_string();
        wtr.write_record([
            entry.date.as_str(),
            entry.title.as_str(),
            entry.category.as_str(),
            amount.as_str(),
        ])?;
    }

    wtr.into_inner()
        .map_err(|e| LedgerError::io("<csv buffer>", e.into_error()))
}

/// Write the CSV rendering of `entries` to `path`. Returns the row count.
pub(crate) fn write_csv(path: &Path, entries: &[Entry]) -> Result<usize> {
    let bytes = entries_to_csv(entries)?;
    std::fs::write(path, bytes).map_err(|e| LedgerError::io(path, e))?;
    tracing::debug!(path = %path.display(), rows = entries.len(), "exported CSV");
    Ok(entries.len())
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
