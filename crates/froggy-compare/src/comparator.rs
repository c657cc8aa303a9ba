//! Per-record, per-field comparison of two record tables.
//!
//! Numeric fields are read as closed intervals and classified as exact,
//! overlap or invalid; categorical fields as match or invalid. Any missing or
//! unparseable sub-value makes the field unavailable, which is never an error.

use tracing::{debug, info};

use froggy_common::parse_finite_f64;
use froggy_model::{
    FieldKind, FieldSpec, Outcome, OutputCell, Record, RecordTable, validate_field_specs,
};

use crate::error::{CompareError, Result, Side};
use crate::interval::Interval;
use crate::summary::ComparisonSummary;
use crate::validity::{valid_number, valid_text};

/// Options for a comparison run.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Compare categorical values ignoring case.
    pub case_insensitive: bool,
    /// Header of the identity column in positional comparisons.
    pub index_column: String,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            index_column: "Row".to_string(),
        }
    }
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    #[must_use]
    pub fn with_index_column(mut self, column: impl Into<String>) -> Self {
        self.index_column = column.into();
        self
    }
}

/// Outcome of one field for one record, with the cells written for it.
///
/// `cells` has one entry per column of the field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldComparison {
    pub outcome: Outcome,
    pub cells: Vec<OutputCell>,
}

impl FieldComparison {
    /// The same token in every column.
    pub fn token(outcome: Outcome, width: usize) -> Self {
        Self {
            outcome,
            cells: vec![OutputCell::token(outcome); width],
        }
    }

    pub fn unavailable(width: usize) -> Self {
        Self::token(Outcome::Unavailable, width)
    }
}

/// One output row: the record identity plus one comparison per field.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub identity: String,
    pub fields: Vec<FieldComparison>,
}

/// Result of comparing two tables over a list of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    /// Header of the identity column (the name column, or the index column).
    pub identity_column: String,
    pub fields: Vec<FieldSpec>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Output column headers, in field order.
    pub fn columns(&self) -> Vec<&str> {
        self.fields
            .iter()
            .flat_map(|field| field.columns.iter().map(String::as_str))
            .collect()
    }

    /// Output cells grouped by column, in the order of [`Self::columns`].
    pub fn column_cells(&self) -> Vec<(&str, Vec<&OutputCell>)> {
        let mut result = Vec::new();
        for (field_index, field) in self.fields.iter().enumerate() {
            for (column_index, column) in field.columns.iter().enumerate() {
                let cells = self
                    .rows
                    .iter()
                    .filter_map(|row| {
                        row.fields
                            .get(field_index)
                            .and_then(|comparison| comparison.cells.get(column_index))
                    })
                    .collect();
                result.push((column.as_str(), cells));
            }
        }
        result
    }

    /// Outcomes of the field at `field_index`, in row order.
    pub fn outcomes(&self, field_index: usize) -> impl Iterator<Item = Outcome> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| row.fields.get(field_index).map(|c| c.outcome))
    }

    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary::from_table(self)
    }
}

/// Compares one field of a reference record against a candidate record.
///
/// A missing record on either side makes the field unavailable.
pub fn compare_field(
    spec: &FieldSpec,
    reference: Option<&Record>,
    candidate: Option<&Record>,
    options: &CompareOptions,
) -> FieldComparison {
    let width = spec.columns.len();
    let (Some(reference), Some(candidate)) = (reference, candidate) else {
        return FieldComparison::unavailable(width);
    };
    match spec.kind {
        FieldKind::ValueUncertainty | FieldKind::MinMax => {
            compare_interval(spec, reference, candidate)
        }
        FieldKind::Categorical => compare_categorical(spec, reference, candidate, options),
    }
}

fn numeric_values(spec: &FieldSpec, record: &Record) -> Option<Vec<f64>> {
    spec.columns
        .iter()
        .map(|column| valid_number(record.get(column)))
        .collect()
}

fn to_interval(kind: FieldKind, values: &[f64]) -> Option<Interval> {
    match (kind, values) {
        (FieldKind::ValueUncertainty, [value, uncertainty]) => {
            Some(Interval::from_value_uncertainty(*value, *uncertainty))
        }
        (FieldKind::MinMax, [min, max]) => Some(Interval::new(*min, *max)),
        _ => None,
    }
}

fn compare_interval(spec: &FieldSpec, reference: &Record, candidate: &Record) -> FieldComparison {
    let width = spec.columns.len();
    let (Some(ref_values), Some(cand_values)) = (
        numeric_values(spec, reference),
        numeric_values(spec, candidate),
    ) else {
        return FieldComparison::unavailable(width);
    };

    if ref_values == cand_values {
        return FieldComparison {
            outcome: Outcome::Exact,
            cells: ref_values.into_iter().map(OutputCell::Number).collect(),
        };
    }

    let (Some(ref_interval), Some(cand_interval)) = (
        to_interval(spec.kind, &ref_values),
        to_interval(spec.kind, &cand_values),
    ) else {
        return FieldComparison::unavailable(width);
    };
    if ref_interval.overlaps(&cand_interval) {
        FieldComparison::token(Outcome::Overlap, width)
    } else {
        FieldComparison::token(Outcome::Invalid, width)
    }
}

fn categories_equal(reference: &str, candidate: &str, case_insensitive: bool) -> bool {
    let same_text = if case_insensitive {
        reference.to_lowercase() == candidate.to_lowercase()
    } else {
        reference == candidate
    };
    // "1" and "1.0" are the same habitat code
    same_text
        || matches!(
            (parse_finite_f64(reference), parse_finite_f64(candidate)),
            (Some(a), Some(b)) if a == b
        )
}

fn compare_categorical(
    spec: &FieldSpec,
    reference: &Record,
    candidate: &Record,
    options: &CompareOptions,
) -> FieldComparison {
    let width = spec.columns.len();
    let Some(column) = spec.columns.first() else {
        return FieldComparison::unavailable(width);
    };
    let (Some(ref_text), Some(cand_text)) = (
        valid_text(reference.get(column)),
        valid_text(candidate.get(column)),
    ) else {
        return FieldComparison::unavailable(width);
    };
    if categories_equal(&ref_text, &cand_text, options.case_insensitive) {
        FieldComparison {
            outcome: Outcome::Match,
            cells: vec![OutputCell::Text(ref_text.into_owned())],
        }
    } else {
        FieldComparison::token(Outcome::Invalid, width)
    }
}

/// Fails if any field column is absent from `table`.
pub(crate) fn require_columns(table: &RecordTable, specs: &[FieldSpec], side: Side) -> Result<()> {
    for spec in specs {
        for column in &spec.columns {
            if !table.has_column(column) {
                return Err(CompareError::MissingColumn {
                    field: spec.name.clone(),
                    column: column.clone(),
                    side,
                });
            }
        }
    }
    Ok(())
}

fn log_field_outcomes(table: &ComparisonTable) {
    for field in table.summary().fields {
        debug!(
            field = %field.field,
            exact = field.counts.exact,
            matched = field.counts.matched,
            overlap = field.counts.overlap,
            invalid = field.counts.invalid,
            unavailable = field.counts.unavailable,
            "field compared"
        );
    }
}

/// Compares reference and candidate records joined by name.
///
/// Rows follow the reference order. A reference record with no candidate
/// counterpart is unavailable in every field. Field specs are validated and
/// every field column must exist in both tables before any row is compared.
pub fn compare_by_name(
    reference: &RecordTable,
    candidate: &RecordTable,
    specs: &[FieldSpec],
    options: &CompareOptions,
) -> Result<ComparisonTable> {
    validate_field_specs(specs)?;
    require_columns(reference, specs, Side::Reference)?;
    require_columns(candidate, specs, Side::Candidate)?;

    let mut unmatched = 0usize;
    let rows: Vec<ComparisonRow> = reference
        .records()
        .iter()
        .map(|record| {
            let counterpart = candidate.get(record.name());
            if counterpart.is_none() {
                unmatched += 1;
            }
            ComparisonRow {
                identity: record.name().to_string(),
                fields: specs
                    .iter()
                    .map(|spec| compare_field(spec, Some(record), counterpart, options))
                    .collect(),
            }
        })
        .collect();

    let table = ComparisonTable {
        identity_column: reference.name_column.clone(),
        fields: specs.to_vec(),
        rows,
    };
    log_field_outcomes(&table);
    info!(
        rows = table.len(),
        fields = specs.len(),
        unmatched,
        "compared tables by name"
    );
    Ok(table)
}

/// Compares two tables row by row for a single field.
///
/// The tables must have the same number of rows; identity is the 0-based row
/// position.
pub fn compare_by_index(
    reference: &RecordTable,
    candidate: &RecordTable,
    spec: &FieldSpec,
    options: &CompareOptions,
) -> Result<ComparisonTable> {
    spec.validate()?;
    let specs = std::slice::from_ref(spec);
    require_columns(reference, specs, Side::Reference)?;
    require_columns(candidate, specs, Side::Candidate)?;
    if reference.len() != candidate.len() {
        return Err(CompareError::RowCountMismatch {
            reference: reference.len(),
            candidate: candidate.len(),
        });
    }

    let rows = reference
        .records()
        .iter()
        .zip(candidate.records())
        .enumerate()
        .map(|(position, (ref_record, cand_record))| ComparisonRow {
            identity: position.to_string(),
            fields: vec![compare_field(spec, Some(ref_record), Some(cand_record), options)],
        })
        .collect();

    let table = ComparisonTable {
        identity_column: options.index_column.clone(),
        fields: vec![spec.clone()],
        rows,
    };
    log_field_outcomes(&table);
    info!(rows = table.len(), field = %spec.name, "compared tables by position");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svl_male() -> FieldSpec {
        FieldSpec::value_uncertainty("SVL Male", "SVL Male (mm)", "+/- SVL Male (mm)")
    }

    fn clutch() -> FieldSpec {
        FieldSpec::min_max("Egg Clutch", "Min Egg Clutch", "Max Egg Clutch")
    }

    fn svl(name: &str, value: &str, uncertainty: &str) -> Record {
        Record::new(name)
            .with_cell("SVL Male (mm)", value)
            .with_cell("+/- SVL Male (mm)", uncertainty)
    }

    fn range(name: &str, min: &str, max: &str) -> Record {
        Record::new(name)
            .with_cell("Min Egg Clutch", min)
            .with_cell("Max Egg Clutch", max)
    }

    fn compare(spec: &FieldSpec, reference: &Record, candidate: &Record) -> FieldComparison {
        compare_field(spec, Some(reference), Some(candidate), &CompareOptions::default())
    }

    #[test]
    fn equal_pairs_are_exact_and_keep_reference_values() {
        let result = compare(&svl_male(), &svl("a", "15", "5"), &svl("a", "15.0", "5"));
        assert_eq!(result.outcome, Outcome::Exact);
        assert_eq!(
            result.cells,
            vec![OutputCell::Number(15.0), OutputCell::Number(5.0)]
        );
    }

    #[test]
    fn value_uncertainty_overlap() {
        let result = compare(&svl_male(), &svl("a", "15", "5"), &svl("a", "21.5", "3.5"));
        assert_eq!(result.outcome, Outcome::Overlap);
        assert_eq!(result.cells, vec![OutputCell::Overlap, OutputCell::Overlap]);
    }

    #[test]
    fn disjoint_ranges_are_invalid() {
        let result = compare(&clutch(), &range("a", "10", "20"), &range("a", "25", "30"));
        assert_eq!(result.outcome, Outcome::Invalid);
        assert_eq!(result.cells, vec![OutputCell::Invalid, OutputCell::Invalid]);
    }

    #[test]
    fn min_max_overlap() {
        let result = compare(&clutch(), &range("a", "5", "10"), &range("a", "8", "12"));
        assert_eq!(result.outcome, Outcome::Overlap);
    }

    #[test]
    fn touching_ranges_overlap() {
        let result = compare(&clutch(), &range("a", "10", "20"), &range("a", "20", "30"));
        assert_eq!(result.outcome, Outcome::Overlap);
    }

    #[test]
    fn any_invalid_sub_value_is_unavailable() {
        for bad in ["-", "", "about 12", "nan"] {
            let result = compare(&svl_male(), &svl("a", "15", bad), &svl("a", "15", "5"));
            assert_eq!(result.outcome, Outcome::Unavailable, "sub-value {bad:?}");
            assert_eq!(
                result.cells,
                vec![OutputCell::Unavailable, OutputCell::Unavailable]
            );
        }
        let result = compare(&clutch(), &range("a", "5", "10"), &range("a", "-", "12"));
        assert_eq!(result.outcome, Outcome::Unavailable);
    }

    #[test]
    fn missing_record_is_unavailable() {
        let result = compare_field(
            &svl_male(),
            Some(&svl("a", "15", "5")),
            None,
            &CompareOptions::default(),
        );
        assert_eq!(result, FieldComparison::unavailable(2));
    }

    #[test]
    fn categorical_match_ignores_case_and_whitespace() {
        let spec = FieldSpec::categorical("Egg Style", "Egg Style");
        let reference = Record::new("a").with_cell("Egg Style", " Aquatic ");
        let candidate = Record::new("a").with_cell("Egg Style", "aquatic");
        let result = compare(&spec, &reference, &candidate);
        assert_eq!(result.outcome, Outcome::Match);
        assert_eq!(result.cells, vec![OutputCell::Text("Aquatic".to_string())]);

        let strict = CompareOptions::new().with_case_insensitive(false);
        let result = compare_field(&spec, Some(&reference), Some(&candidate), &strict);
        assert_eq!(result.outcome, Outcome::Invalid);
    }

    #[test]
    fn categorical_mismatch_and_missing() {
        let spec = FieldSpec::categorical("Habitat 1", "1");
        let one = Record::new("a").with_cell("1", "1");
        let one_float = Record::new("a").with_cell("1", "1.0");
        let zero = Record::new("a").with_cell("1", "0");
        let blank = Record::new("a").with_cell("1", "-");
        assert_eq!(compare(&spec, &one, &one_float).outcome, Outcome::Match);
        assert_eq!(compare(&spec, &one, &zero).outcome, Outcome::Invalid);
        assert_eq!(compare(&spec, &one, &blank).outcome, Outcome::Unavailable);
        assert_eq!(
            compare(&spec, &one, &zero).cells,
            vec![OutputCell::Invalid]
        );
    }

    #[test]
    fn compare_by_name_follows_reference_order() {
        let reference: RecordTable = [
            svl("Rana temporaria", "70", "5"),
            svl("Bufo bufo", "80", "0"),
            svl("Hyla arborea", "40", "2"),
        ]
        .into_iter()
        .collect();
        let candidate: RecordTable = [svl("Hyla arborea", "60", "1"), svl("Bufo bufo", "80", "0")]
            .into_iter()
            .collect();
        let table =
            compare_by_name(&reference, &candidate, &[svl_male()], &CompareOptions::default())
                .unwrap();
        let identities: Vec<&str> = table.rows.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(identities, vec!["Rana temporaria", "Bufo bufo", "Hyla arborea"]);
        let outcomes: Vec<Outcome> = table.outcomes(0).collect();
        assert_eq!(
            outcomes,
            vec![Outcome::Unavailable, Outcome::Exact, Outcome::Invalid]
        );
        assert_eq!(table.identity_column, "Name");
        assert_eq!(table.columns(), vec!["SVL Male (mm)", "+/- SVL Male (mm)"]);
    }

    #[test]
    fn compare_by_name_requires_columns_on_both_sides() {
        let reference: RecordTable = [svl("Bufo bufo", "80", "0")].into_iter().collect();
        let candidate: RecordTable = [range("Bufo bufo", "1", "2")].into_iter().collect();
        let err = compare_by_name(&reference, &candidate, &[svl_male()], &CompareOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CompareError::MissingColumn {
                side: Side::Candidate,
                ..
            }
        ));
    }

    #[test]
    fn compare_by_index_requires_equal_lengths() {
        let altitude = FieldSpec::min_max("Altitude", "Min Altitude", "Max Altitude");
        let row = |name: &str, min: &str, max: &str| {
            Record::new(name)
                .with_cell("Min Altitude", min)
                .with_cell("Max Altitude", max)
        };
        let reference: RecordTable = [row("a", "0", "1000"), row("b", "200", "800")]
            .into_iter()
            .collect();
        let candidate: RecordTable = [row("x", "0", "1000")].into_iter().collect();
        let err = compare_by_index(&reference, &candidate, &altitude, &CompareOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CompareError::RowCountMismatch {
                reference: 2,
                candidate: 1
            }
        ));

        let candidate: RecordTable = [row("x", "0", "1000"), row("y", "900", "1200")]
            .into_iter()
            .collect();
        let table =
            compare_by_index(&reference, &candidate, &altitude, &CompareOptions::default())
                .unwrap();
        assert_eq!(table.identity_column, "Row");
        assert_eq!(table.rows[1].identity, "1");
        let outcomes: Vec<Outcome> = table.outcomes(0).collect();
        assert_eq!(outcomes, vec![Outcome::Exact, Outcome::Invalid]);
    }
}
