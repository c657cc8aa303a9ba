//! JSON summary report.

use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use froggy_compare::{ComparisonSummary, ConfidenceReport};

use crate::error::{OutputError, Result};
use crate::frame::ensure_parent_dir;

const REPORT_SCHEMA: &str = "froggy-xverify.summary";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub comparisons: Vec<ComparisonEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceEntry>,
}

#[derive(Debug, Serialize)]
pub struct ComparisonEntry {
    #[serde(flatten)]
    pub summary: ComparisonSummary,
    pub agreement_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ConfidenceEntry {
    #[serde(flatten)]
    pub report: ConfidenceReport,
    pub mean_correct: Option<f64>,
    pub mean_incorrect: Option<f64>,
}

/// Builds the report document stamped with the current time.
pub fn build_summary_report(
    summaries: &[ComparisonSummary],
    confidence: Option<&ConfidenceReport>,
) -> SummaryReport {
    SummaryReport {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        comparisons: summaries
            .iter()
            .map(|summary| ComparisonEntry {
                agreement_rate: summary.agreement_rate(),
                summary: summary.clone(),
            })
            .collect(),
        confidence: confidence.map(|report| ConfidenceEntry {
            mean_correct: report.mean_correct(),
            mean_incorrect: report.mean_incorrect(),
            report: report.clone(),
        }),
    }
}

/// Writes the summary report to `path` as pretty JSON.
pub fn write_summary_json(
    summaries: &[ComparisonSummary],
    confidence: Option<&ConfidenceReport>,
    path: &Path,
) -> Result<()> {
    ensure_parent_dir(path)?;
    let payload = build_summary_report(summaries, confidence);
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(path, format!("{json}\n")).map_err(|e| OutputError::io(path, e))?;
    tracing::info!(path = %path.display(), "wrote summary JSON");
    Ok(())
}
