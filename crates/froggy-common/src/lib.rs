//! Shared utilities for the froggy workspace.
//!
//! Polars cell conversions, numeric parsing and formatting, and the
//! missing-value sentinel used by the trait spreadsheets.

pub mod sentinel;
pub mod values;

pub use sentinel::{MISSING_SENTINEL, is_blank_text, is_missing_text};
pub use values::{any_to_f64, any_to_string, format_numeric, parse_code, parse_finite_f64};
