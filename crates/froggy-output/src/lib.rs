//! Output for cross-verification results.
//!
//! Comparison tables are written as CSV through Polars, merged into existing
//! result sheets by row position or by name, and summarized as JSON.

mod error;
mod frame;
mod summary;

pub use error::{OutputError, Result};
pub use frame::{
    comparison_to_csv_string, comparison_to_frame, merge_columns, merge_columns_by_name,
    write_comparison_csv, write_frame_csv,
};
pub use summary::{
    ComparisonEntry, ConfidenceEntry, SummaryReport, build_summary_report, write_summary_json,
};
