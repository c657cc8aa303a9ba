//! CSV reading.
//!
//! Every column is read as text; typing happens later, cell by cell, because
//! the trait sheets mix numbers with `-` placeholders in the same column.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, PlSmallStr, SerReader};

use crate::error::{IngestError, Result};

const UTF8_BOM: &str = "\u{feff}";

/// Rejects empty files and UTF-16 exports by looking at the leading bytes.
fn sniff(path: &Path) -> Result<()> {
    let mut prefix = Vec::with_capacity(4);
    File::open(path)
        .and_then(|file| file.take(4).read_to_end(&mut prefix))
        .map_err(|e| IngestError::io(path, e))?;
    let encoding = match prefix.get(..2) {
        Some([0xFF, 0xFE]) => Some("UTF-16 LE"),
        Some([0xFE, 0xFF]) => Some("UTF-16 BE"),
        _ => None,
    };
    if let Some(encoding) = encoding {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding,
        });
    }
    if prefix.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn read_frame(path: &Path, n_rows: Option<usize>) -> Result<DataFrame> {
    sniff(path)?;
    let parse_error = |e: polars::prelude::PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_n_rows(n_rows)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    let names: Vec<PlSmallStr> = df
        .get_column_names()
        .iter()
        .map(|name| PlSmallStr::from(name.trim_start_matches(UTF8_BOM).trim()))
        .collect();
    df.set_column_names(names)?;
    Ok(df)
}

/// Reads the header row of a CSV file, trimmed.
pub fn read_csv_headers(path: &Path) -> Result<Vec<String>> {
    let df = read_frame(path, Some(0))?;
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    Ok(headers)
}

/// Reads a CSV file into a Polars DataFrame with every column as text.
///
/// Column names are trimmed and stripped of a UTF-8 BOM so they match the
/// header strings used in field specs.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    let df = read_frame(path, None)?;
    tracing::debug!(
        path = %path.display(),
        columns = df.width(),
        rows = df.height(),
        "loaded CSV table"
    );
    Ok(df)
}
