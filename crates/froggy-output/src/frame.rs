//! Comparison tables as Polars DataFrames and CSV files.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::Path;

use polars::prelude::{
    Column, CsvWriter, DataFrame, DataType, IntoColumn, NamedFrom, SerWriter, Series,
};
use tracing::{debug, info};

use froggy_compare::ComparisonTable;
use froggy_model::OutputCell;

use crate::error::{OutputError, Result};

/// Ensure a parent directory exists for a file path.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| OutputError::io(parent, e))?;
    }
    Ok(())
}

fn field_columns(table: &ComparisonTable) -> Vec<Column> {
    table
        .column_cells()
        .into_iter()
        .map(|(name, cells)| {
            let values: Vec<String> = cells.iter().map(ToString::to_string).collect();
            Series::new(name.into(), values).into_column()
        })
        .collect()
}

/// Converts a comparison table to a DataFrame of strings.
///
/// The identity column comes first, followed by every field column in field
/// order.
pub fn comparison_to_frame(table: &ComparisonTable) -> Result<DataFrame> {
    let identities: Vec<String> = table.rows.iter().map(|row| row.identity.clone()).collect();
    let mut columns = vec![Series::new(table.identity_column.as_str().into(), identities).into_column()];
    columns.extend(field_columns(table));
    Ok(DataFrame::new(columns)?)
}

fn write_frame<W: std::io::Write>(df: &mut DataFrame, writer: W) -> Result<()> {
    CsvWriter::new(writer).include_header(true).finish(df)?;
    Ok(())
}

/// Renders a comparison table as CSV text.
pub fn comparison_to_csv_string(table: &ComparisonTable) -> Result<String> {
    let mut df = comparison_to_frame(table)?;
    let mut buffer = Vec::new();
    write_frame(&mut df, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| OutputError::DataFrame {
        message: e.to_string(),
    })
}

/// Writes a DataFrame to `path` as CSV, creating parent directories.
pub fn write_frame_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
    write_frame(df, file)?;
    info!(path = %path.display(), rows = df.height(), columns = df.width(), "wrote CSV");
    Ok(())
}

/// Writes a comparison table to `path` as CSV.
pub fn write_comparison_csv(table: &ComparisonTable, path: &Path) -> Result<()> {
    let mut df = comparison_to_frame(table)?;
    write_frame_csv(&mut df, path)
}

/// Writes the table's field columns onto `base` by row position.
///
/// Existing columns of the same name are replaced; others are appended. The
/// row counts must match.
pub fn merge_columns(base: &mut DataFrame, table: &ComparisonTable) -> Result<()> {
    if base.height() != table.len() {
        return Err(OutputError::RowCountMismatch {
            expected: base.height(),
            found: table.len(),
        });
    }
    for column in field_columns(table) {
        debug!(column = %column.name(), "merging column");
        base.with_column(column)?;
    }
    Ok(())
}

/// Writes the table's field columns onto `base`, joining on `name_column`.
///
/// Each base row takes the cells of the comparison row with the same name;
/// rows without one get `-`. Existing columns of the same name are replaced.
/// Returns the number of base rows that had no comparison row.
pub fn merge_columns_by_name(
    base: &mut DataFrame,
    table: &ComparisonTable,
    name_column: &str,
) -> Result<usize> {
    let names: Vec<String> = {
        let column = base
            .column(name_column)
            .map_err(|_| OutputError::MissingColumn {
                column: name_column.to_string(),
            })?
            .cast(&DataType::String)?;
        column
            .str()?
            .into_iter()
            .map(|name| name.unwrap_or_default().trim().to_string())
            .collect()
    };

    let mut positions: BTreeMap<&str, usize> = BTreeMap::new();
    for (position, row) in table.rows.iter().enumerate() {
        positions.entry(row.identity.as_str()).or_insert(position);
    }
    let unmatched = names
        .iter()
        .filter(|name| !positions.contains_key(name.as_str()))
        .count();

    let unavailable = OutputCell::Unavailable.to_string();
    for (header, cells) in table.column_cells() {
        let values: Vec<String> = names
            .iter()
            .map(|name| {
                positions
                    .get(name.as_str())
                    .and_then(|&position| cells.get(position))
                    .map_or_else(|| unavailable.clone(), ToString::to_string)
            })
            .collect();
        debug!(column = header, "merging column by name");
        base.with_column(Series::new(header.into(), values).into_column())?;
    }
    if unmatched > 0 {
        debug!(unmatched, name_column, "result rows without a comparison row");
    }
    Ok(unmatched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use froggy_compare::{ComparisonRow, FieldComparison};
    use froggy_model::{FieldSpec, Outcome, OutputCell};

    fn altitude_table() -> ComparisonTable {
        ComparisonTable {
            identity_column: "Row".to_string(),
            fields: vec![FieldSpec::min_max("Altitude", "Min Altitude", "Max Altitude")],
            rows: vec![
                ComparisonRow {
                    identity: "0".to_string(),
                    fields: vec![FieldComparison {
                        outcome: Outcome::Exact,
                        cells: vec![OutputCell::Number(0.0), OutputCell::Number(1500.0)],
                    }],
                },
                ComparisonRow {
                    identity: "1".to_string(),
                    fields: vec![FieldComparison::token(Outcome::Overlap, 2)],
                },
            ],
        }
    }

    #[test]
    fn frame_has_identity_then_fields() {
        let df = comparison_to_frame(&altitude_table()).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["Row", "Min Altitude", "Max Altitude"]);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn merge_replaces_and_appends() {
        let mut base = DataFrame::new(vec![
            Series::new("Name".into(), vec!["Bufo bufo", "Hyla arborea"]).into_column(),
            Series::new("Min Altitude".into(), vec!["old", "old"]).into_column(),
        ])
        .unwrap();
        merge_columns(&mut base, &altitude_table()).unwrap();
        assert_eq!(base.width(), 3);
        let min = base.column("Min Altitude").unwrap().str().unwrap();
        assert_eq!(min.get(0), Some("0"));
        let max = base.column("Max Altitude").unwrap().str().unwrap();
        assert_eq!(max.get(1), Some("overlap"));
    }

    fn egg_style_table() -> ComparisonTable {
        ComparisonTable {
            identity_column: "Name".to_string(),
            fields: vec![FieldSpec::categorical("Egg Style", "Egg Style")],
            rows: vec![
                ComparisonRow {
                    identity: "Hyla arborea".to_string(),
                    fields: vec![FieldComparison {
                        outcome: Outcome::Match,
                        cells: vec![OutputCell::Text("1".to_string())],
                    }],
                },
                ComparisonRow {
                    identity: "Bufo bufo".to_string(),
                    fields: vec![FieldComparison::token(Outcome::Invalid, 1)],
                },
            ],
        }
    }

    #[test]
    fn merge_by_name_follows_base_order() {
        let mut base = DataFrame::new(vec![
            Series::new("Name".into(), vec!["Bufo bufo", "Rana temporaria", "Hyla arborea"])
                .into_column(),
            Series::new("SVL Male (mm)".into(), vec!["80", "-", "overlap"]).into_column(),
        ])
        .unwrap();
        let unmatched = merge_columns_by_name(&mut base, &egg_style_table(), "Name").unwrap();
        assert_eq!(unmatched, 1);
        let egg = base.column("Egg Style").unwrap().str().unwrap();
        let values: Vec<Option<&str>> = egg.into_iter().collect();
        assert_eq!(values, vec![Some("invalid"), Some("-"), Some("1")]);
    }

    #[test]
    fn merge_by_name_requires_name_column() {
        let mut base = DataFrame::new(vec![
            Series::new("Species".into(), vec!["Bufo bufo"]).into_column(),
        ])
        .unwrap();
        let err = merge_columns_by_name(&mut base, &egg_style_table(), "Name").unwrap_err();
        assert!(matches!(err, OutputError::MissingColumn { column } if column == "Name"));
    }

    #[test]
    fn merge_rejects_length_mismatch() {
        let mut base = DataFrame::new(vec![
            Series::new("Name".into(), vec!["Bufo bufo"]).into_column(),
        ])
        .unwrap();
        let err = merge_columns(&mut base, &altitude_table()).unwrap_err();
        assert!(matches!(
            err,
            OutputError::RowCountMismatch {
                expected: 1,
                found: 2
            }
        ));
    }
}
