//! Trait table ingestion.
//!
//! This crate loads the reference and candidate spreadsheets (exported as CSV)
//! into [`RecordTable`](froggy_model::RecordTable)s and prepares them for the
//! comparator.
//!
//! # Features
//!
//! - **CSV Loading**: every column read as text with Polars
//! - **Record Tables**: rows keyed by species name, sentinel cells mapped to `Missing`
//! - **Preparation**: trusted-name restriction, uncertainty back-fill, confidence scores
//! - **Field Specs**: TOML field configuration files
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use froggy_ingest::{fill_missing, load_name_list, load_records};
//! use froggy_model::MORPHOLOGY_UNCERTAINTY_COLUMNS;
//!
//! let mut reference = load_records(Path::new("data/reference.csv"), "Name")?;
//! let trusted = load_name_list(Path::new("data/trusted.txt"))?;
//! reference.retain_names(&trusted);
//! fill_missing(&mut reference, MORPHOLOGY_UNCERTAINTY_COLUMNS, 0.0);
//! ```

mod csv;
mod error;
mod fields;
mod names;
mod prepare;
mod records;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{read_csv_headers, read_csv_table};

// === Record Tables ===
pub use records::{cell_from_any, load_records, records_from_frame};

// === Preparation ===
pub use fields::load_field_specs;
pub use names::{load_name_list, parse_name_list};
pub use prepare::{confidence_scores, fill_missing, restrict_to_reference};
