//! Cross-verification of species trait tables.
//!
//! Compares a curated reference table against a candidate table field by
//! field. Numeric fields are treated as closed intervals (`value ± uncertainty`
//! or `min..max`); categorical fields by trimmed, case-insensitive equality.
//! Comparison performs no I/O and never fails on malformed cells: those
//! degrade to [`Outcome::Unavailable`](froggy_model::Outcome::Unavailable).
//! Only configuration problems (unknown columns, mismatched row counts) are
//! errors, and they are raised before any row is compared.

mod comparator;
mod confidence;
mod error;
mod interval;
mod summary;
mod validity;

pub use comparator::{
    CompareOptions, ComparisonRow, ComparisonTable, FieldComparison, compare_by_index,
    compare_by_name, compare_field,
};
pub use confidence::{ConfidenceReport, fold_confidence};
pub use error::{CompareError, Result, Side};
pub use interval::Interval;
pub use summary::{ComparisonSummary, FieldSummary, OutcomeCounts};
pub use validity::{valid_code, valid_number, valid_text};
