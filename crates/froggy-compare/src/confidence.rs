//! Correctness of integer-coded predictions, bucketed by confidence.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use froggy_model::{FieldSpec, Outcome, OutputCell, RecordTable, TransitionRule};

use crate::comparator::{ComparisonRow, ComparisonTable, FieldComparison, require_columns};
use crate::error::{Result, Side};
use crate::validity::valid_code;

/// Confidence scores split by whether the prediction was correct.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfidenceReport {
    pub field: String,
    pub correct_confidences: Vec<f64>,
    pub incorrect_confidences: Vec<f64>,
    pub correct: usize,
    pub incorrect: usize,
    pub unavailable: usize,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl ConfidenceReport {
    /// Mean confidence of correct predictions; `None` if there were none.
    pub fn mean_correct(&self) -> Option<f64> {
        mean(&self.correct_confidences)
    }

    /// Mean confidence of incorrect predictions; `None` if there were none.
    pub fn mean_incorrect(&self) -> Option<f64> {
        mean(&self.incorrect_confidences)
    }
}

/// Compares an integer-coded field under `rule` and buckets confidence scores.
///
/// Only reference records are evaluated. A record is correct when
/// `(predicted, reference)` is in the rule; its confidence, if any, goes into
/// the matching bucket. Non-integer or missing codes on either side are
/// unavailable and contribute no confidence.
pub fn fold_confidence(
    reference: &RecordTable,
    candidate: &RecordTable,
    column: &str,
    rule: &TransitionRule,
    confidences: &BTreeMap<String, f64>,
) -> Result<(ComparisonTable, ConfidenceReport)> {
    let spec = FieldSpec::categorical(column, column);
    spec.validate()?;
    let specs = std::slice::from_ref(&spec);
    require_columns(reference, specs, Side::Reference)?;
    require_columns(candidate, specs, Side::Candidate)?;

    let mut report = ConfidenceReport {
        field: column.to_string(),
        ..ConfidenceReport::default()
    };
    let mut rows = Vec::with_capacity(reference.len());
    for record in reference.records() {
        let name = record.name();
        let expected = valid_code(record.get(column));
        let predicted = candidate
            .get(name)
            .and_then(|prediction| valid_code(prediction.get(column)));

        let comparison = match (predicted, expected) {
            (Some(predicted), Some(expected)) => {
                let correct = rule.is_correct(predicted, expected);
                let score = confidences.get(name).copied();
                if correct {
                    report.correct += 1;
                    report.correct_confidences.extend(score);
                    FieldComparison {
                        outcome: Outcome::Match,
                        cells: vec![OutputCell::Number(predicted as f64)],
                    }
                } else {
                    report.incorrect += 1;
                    report.incorrect_confidences.extend(score);
                    FieldComparison::token(Outcome::Invalid, 1)
                }
            }
            _ => {
                report.unavailable += 1;
                FieldComparison::unavailable(1)
            }
        };
        rows.push(ComparisonRow {
            identity: name.to_string(),
            fields: vec![comparison],
        });
    }

    info!(
        field = column,
        correct = report.correct,
        incorrect = report.incorrect,
        unavailable = report.unavailable,
        "folded confidence scores"
    );
    let table = ComparisonTable {
        identity_column: reference.name_column.clone(),
        fields: vec![spec],
        rows,
    };
    Ok((table, report))
}
