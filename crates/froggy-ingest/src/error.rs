//! Error types for trait table ingestion.

use std::path::PathBuf;
use thiserror::Error;

use froggy_model::ModelError;

/// Failures while loading and preparing the reference and candidate sheets.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no such input file: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars rejected the file.
    #[error("malformed CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    #[error("{path} contains no data")]
    EmptyCsv { path: PathBuf },

    #[error("no header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// File starts with a byte-order mark we cannot read.
    #[error("unsupported encoding {encoding} in {path}; re-export the sheet as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// The name column (or another required column) is absent from a sheet.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Column lookup failed on an already loaded frame or table.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    #[error("polars: {message}")]
    DataFrame { message: String },

    /// Field spec file could not be parsed or validated.
    #[error("invalid field specs in {path}: {source}")]
    FieldSpecs {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl IngestError {
    /// Maps an I/O error on `path` to `FileNotFound` or `FileRead`.
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
