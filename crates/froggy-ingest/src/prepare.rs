//! Pre-comparison table preparation.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use froggy_model::{CellValue, RecordTable};

use crate::error::{IngestError, Result};

/// Replaces blank cells in `columns` with `value`.
///
/// An explicit `-` is left alone so it still compares as unavailable.
/// Columns the table does not have are ignored. Returns the number of cells
/// filled.
pub fn fill_missing(table: &mut RecordTable, columns: &[&str], value: f64) -> usize {
    let present: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|column| table.has_column(column) && *column != table.name_column)
        .collect();
    let mut filled = 0usize;
    for cells in table.cells_mut() {
        for column in &present {
            let cell = cells.entry((*column).to_string()).or_default();
            if cell.is_blank() {
                *cell = CellValue::Number(value);
                filled += 1;
            }
        }
    }
    debug!(columns = present.len(), filled, "back-filled blank cells");
    filled
}

/// Drops candidate records whose name does not appear in `reference`.
///
/// Returns the number of records removed.
pub fn restrict_to_reference(candidate: &mut RecordTable, reference: &RecordTable) -> usize {
    let names: BTreeSet<String> = reference.names().map(str::to_string).collect();
    let removed = candidate.retain_names(&names);
    info!(
        kept = candidate.len(),
        removed, "restricted candidate records to reference names"
    );
    removed
}

/// Collects the numeric confidence score of each record.
///
/// Records whose score is missing or not numeric are left out.
pub fn confidence_scores(table: &RecordTable, column: &str) -> Result<BTreeMap<String, f64>> {
    if !table.has_column(column) {
        return Err(IngestError::ColumnNotFound {
            column: column.to_string(),
        });
    }
    let mut scores = BTreeMap::new();
    for record in table.records() {
        if let Some(score) = record.get(column).as_number() {
            scores.entry(record.name().to_string()).or_insert(score);
        }
    }
    debug!(column, scored = scores.len(), total = table.len(), "collected confidence scores");
    Ok(scores)
}
