//! Error types for comparisons.

use std::fmt;

use thiserror::Error;

use froggy_model::ModelError;

/// Which input table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Reference,
    Candidate,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => f.write_str("reference"),
            Self::Candidate => f.write_str("candidate"),
        }
    }
}

/// Configuration errors raised before any row is compared.
#[derive(Debug, Error)]
pub enum CompareError {
    /// A configured field column is absent from an input table.
    #[error("column '{column}' of field '{field}' not found in {side} table")]
    MissingColumn {
        field: String,
        column: String,
        side: Side,
    },

    /// Positional comparison needs tables of equal length.
    #[error("row count mismatch: reference has {reference} rows, candidate has {candidate}")]
    RowCountMismatch { reference: usize, candidate: usize },

    /// Field specs failed validation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for comparison operations.
pub type Result<T> = std::result::Result<T, CompareError>;
