//! Record tables built from Polars DataFrames.

use std::path::Path;

use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::{debug, warn};

use froggy_common::{any_to_f64, any_to_string, is_missing_text};
use froggy_model::{CellValue, Record, RecordTable};

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};

/// Converts a Polars value into a model cell.
///
/// Nulls, empty text and NaN become `Blank`; the `-` sentinel becomes
/// `Missing`.
pub fn cell_from_any(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Blank,
        AnyValue::Float32(v) if v.is_nan() => CellValue::Blank,
        AnyValue::Float64(v) if v.is_nan() => CellValue::Blank,
        AnyValue::String(s) => CellValue::from_text(s),
        AnyValue::StringOwned(s) => CellValue::from_text(&s),
        numeric @ (AnyValue::Int8(_)
        | AnyValue::Int16(_)
        | AnyValue::Int32(_)
        | AnyValue::Int64(_)
        | AnyValue::UInt8(_)
        | AnyValue::UInt16(_)
        | AnyValue::UInt32(_)
        | AnyValue::UInt64(_)
        | AnyValue::Float32(_)
        | AnyValue::Float64(_)) => any_to_f64(numeric).map_or(CellValue::Missing, CellValue::Number),
        other => CellValue::from_text(&any_to_string(other)),
    }
}

/// Builds a record table keyed by `name_column`.
///
/// Fails before reading any row if the name column is absent. Rows with a
/// blank or sentinel name are skipped.
pub fn records_from_frame(df: &DataFrame, name_column: &str) -> Result<RecordTable> {
    let name_column = name_column.trim();
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    if !headers.iter().any(|header| header == name_column) {
        return Err(IngestError::ColumnNotFound {
            column: name_column.to_string(),
        });
    }

    let names = df.column(name_column)?;
    let value_columns: Vec<(&String, &Column)> = headers
        .iter()
        .filter(|header| header.as_str() != name_column)
        .map(|header| df.column(header).map(|column| (header, column)))
        .collect::<std::result::Result<_, _>>()?;

    let mut table = RecordTable::new(
        name_column,
        value_columns
            .iter()
            .map(|(header, _)| (*header).clone())
            .collect(),
    );
    let mut skipped = 0usize;
    for row in 0..df.height() {
        let name = any_to_string(names.get(row)?);
        if is_missing_text(&name) {
            skipped += 1;
            continue;
        }
        let mut record = Record::new(name);
        for (header, column) in &value_columns {
            record.set((*header).clone(), cell_from_any(column.get(row)?));
        }
        let name = record.name().to_string();
        if !table.push(record) {
            warn!(name = %name, "duplicate species name; first occurrence is used for lookups");
        }
    }
    if skipped > 0 {
        warn!(skipped, "skipped rows without a species name");
    }
    debug!(
        name_column = %table.name_column,
        records = table.len(),
        columns = table.columns.len(),
        "built record table"
    );
    Ok(table)
}

/// Loads a CSV file as a record table keyed by `name_column`.
pub fn load_records(path: &Path, name_column: &str) -> Result<RecordTable> {
    let df = read_csv_table(path)?;
    records_from_frame(&df, name_column).map_err(|err| match err {
        IngestError::ColumnNotFound { column } => IngestError::MissingColumn {
            column,
            path: path.to_path_buf(),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn text_frame(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn cell_conversion() {
        assert_eq!(cell_from_any(AnyValue::Null), CellValue::Blank);
        assert_eq!(cell_from_any(AnyValue::String("")), CellValue::Blank);
        assert_eq!(cell_from_any(AnyValue::String(" - ")), CellValue::Missing);
        assert_eq!(cell_from_any(AnyValue::Float64(f64::NAN)), CellValue::Blank);
        assert_eq!(cell_from_any(AnyValue::Int64(3)), CellValue::Number(3.0));
        assert_eq!(
            cell_from_any(AnyValue::String("12.5")),
            CellValue::Text("12.5".to_string())
        );
    }

    #[test]
    fn builds_records_in_order() {
        let df = text_frame(vec![
            ("Name", vec![Some("Rana temporaria"), Some("Bufo bufo")]),
            ("Min Altitude", vec![Some("0"), None]),
        ]);
        let table = records_from_frame(&df, "Name").unwrap();
        assert_eq!(table.columns, vec!["Min Altitude"]);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["Rana temporaria", "Bufo bufo"]);
        let bufo = table.get("Bufo bufo").unwrap();
        assert!(bufo.get("Min Altitude").is_missing());
    }

    #[test]
    fn missing_name_column_fails_fast() {
        let df = text_frame(vec![("Species", vec![Some("Bufo bufo")])]);
        let err = records_from_frame(&df, "Name").unwrap_err();
        assert!(matches!(err, IngestError::ColumnNotFound { column } if column == "Name"));
    }

    #[test]
    fn blank_names_are_skipped() {
        let df = text_frame(vec![
            ("Name", vec![Some("Bufo bufo"), None, Some("-")]),
            ("Egg Style", vec![Some("1"), Some("2"), Some("0")]),
        ]);
        let table = records_from_frame(&df, "Name").unwrap();
        assert_eq!(table.len(), 1);
    }
}
