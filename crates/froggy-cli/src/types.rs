use std::path::PathBuf;

use froggy_compare::{ComparisonSummary, ConfidenceReport};
use froggy_model::{Preset, TransitionRule};

/// Where the field list of a `values` run comes from.
#[derive(Debug, Clone)]
pub enum FieldSource {
    Preset(Preset),
    File(PathBuf),
}

/// Name-joined comparison of two tables.
#[derive(Debug, Clone)]
pub struct ValuesRequest {
    pub reference: PathBuf,
    pub candidate: PathBuf,
    pub output: PathBuf,
    pub name_column: String,
    pub fields: FieldSource,
    pub trusted: Option<PathBuf>,
    /// Back-fill blank reference uncertainties with 0.
    pub fill_uncertainty: bool,
    /// Existing result sheet to fold the field columns into, by name.
    pub merge_into: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

/// Row-aligned altitude comparison.
#[derive(Debug, Clone)]
pub struct AltitudeRequest {
    pub reference: PathBuf,
    pub candidate: PathBuf,
    pub output: PathBuf,
    pub name_column: String,
    /// Header of the row-number column when no merge target is given.
    pub index_column: String,
    /// Applied to both tables before rows are aligned.
    pub trusted: Option<PathBuf>,
    /// Existing result sheet to merge the altitude columns into, by position.
    pub merge_into: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

/// Egg-style correctness against extraction confidence.
#[derive(Debug, Clone)]
pub struct EggStyleRequest {
    pub reference: PathBuf,
    pub candidate: PathBuf,
    /// File holding confidence scores; the candidate file when `None`.
    pub confidence: Option<PathBuf>,
    pub output: PathBuf,
    pub trusted: Option<PathBuf>,
    pub name_column: String,
    pub column: String,
    pub confidence_column: String,
    pub rule: TransitionRule,
    /// Existing result sheet to fold the egg-style column into, by name.
    pub merge_into: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

/// What a command produced.
#[derive(Debug)]
pub struct RunResult {
    pub command: &'static str,
    pub output: PathBuf,
    pub summary: ComparisonSummary,
    pub confidence: Option<ConfidenceReport>,
    /// Reference rows dropped by the trusted-name list.
    pub untrusted_dropped: Option<usize>,
    /// Candidate rows dropped for having no reference counterpart.
    pub candidate_dropped: usize,
    pub summary_json: Option<PathBuf>,
}
