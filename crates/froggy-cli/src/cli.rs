//! CLI argument definitions for froggy-xverify.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use froggy_cli::types::{AltitudeRequest, EggStyleRequest, FieldSource, ValuesRequest};
use froggy_model::{Preset, TransitionRule};

#[derive(Parser)]
#[command(
    name = "froggy-xverify",
    version,
    about = "Cross-verify extracted frog traits against a curated reference sheet",
    long_about = "Cross-verify extracted frog traits against a curated reference sheet.\n\n\
                  Numeric traits are compared as intervals (exact, overlap, invalid);\n\
                  categorical traits by case-insensitive equality. Cells that are\n\
                  missing or unparseable on either side are reported as '-'."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two tables joined by species name.
    Values(ValuesArgs),

    /// Compare altitude ranges of two row-aligned tables.
    Altitude(AltitudeArgs),

    /// Score egg-style predictions and split confidence by correctness.
    EggStyle(EggStyleArgs),

    /// List the built-in field presets.
    Fields,
}

/// Input and output files shared by every comparison.
#[derive(Args)]
pub struct TableArgs {
    /// Curated reference table (CSV).
    #[arg(long, value_name = "CSV")]
    pub reference: PathBuf,

    /// Candidate table under evaluation (CSV).
    #[arg(long, value_name = "CSV")]
    pub candidate: PathBuf,

    /// Where to write the comparison table (CSV).
    #[arg(long, short = 'o', value_name = "CSV")]
    pub output: PathBuf,

    /// Column holding the species name in both tables.
    #[arg(long = "name-column", default_value = "Name")]
    pub name_column: String,

    /// Also write a JSON summary of the outcome counts.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValuesArgs {
    #[command(flatten)]
    pub tables: TableArgs,

    /// Built-in field list to compare.
    #[arg(long, value_enum, default_value = "morphology", conflicts_with = "fields")]
    pub preset: PresetArg,

    /// TOML file of `[[field]]` tables to compare instead of a preset.
    #[arg(long, value_name = "TOML")]
    pub fields: Option<PathBuf>,

    /// Restrict the reference to the species listed in this file (one per line).
    #[arg(long, value_name = "PATH")]
    pub trusted: Option<PathBuf>,

    /// Leave blank reference uncertainties blank instead of treating them as 0.
    #[arg(long = "no-fill-uncertainty")]
    pub no_fill_uncertainty: bool,

    /// Existing result sheet to receive the field columns (joined by name).
    #[arg(long = "merge-into", value_name = "CSV")]
    pub merge_into: Option<PathBuf>,
}

#[derive(Args)]
pub struct AltitudeArgs {
    #[command(flatten)]
    pub tables: TableArgs,

    /// Keep only the species listed in this file, in both tables, before aligning rows.
    #[arg(long, value_name = "PATH")]
    pub trusted: Option<PathBuf>,

    /// Header of the row-number column in the altitude table.
    #[arg(long = "index-column", default_value = "Row")]
    pub index_column: String,

    /// Existing result sheet to receive the altitude columns (by row position).
    #[arg(long = "merge-into", value_name = "CSV")]
    pub merge_into: Option<PathBuf>,
}

#[derive(Args)]
pub struct EggStyleArgs {
    #[command(flatten)]
    pub tables: TableArgs,

    /// Table holding confidence scores (defaults to the candidate table).
    #[arg(long, value_name = "CSV")]
    pub confidence: Option<PathBuf>,

    /// Restrict the reference to the species listed in this file (one per line).
    #[arg(long, value_name = "PATH")]
    pub trusted: Option<PathBuf>,

    /// Egg style column in both tables.
    #[arg(long, default_value = "Egg Style")]
    pub column: String,

    /// Confidence score column.
    #[arg(long = "confidence-column", default_value = "Confidence")]
    pub confidence_column: String,

    /// Accepted PREDICTED:REFERENCE code pair; repeat for more (default 0:1 and 1:2).
    #[arg(long = "transition", value_name = "P:R", value_parser = parse_transition)]
    pub transitions: Vec<(i64, i64)>,

    /// Existing result sheet to receive the egg style column (joined by name).
    #[arg(long = "merge-into", value_name = "CSV")]
    pub merge_into: Option<PathBuf>,
}

fn parse_transition(value: &str) -> Result<(i64, i64), String> {
    TransitionRule::parse_pair(value).map_err(|error| error.to_string())
}

/// CLI preset choices for `values`.
#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    Morphology,
    Habitat,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl ValuesArgs {
    pub fn to_request(&self) -> ValuesRequest {
        let fields = match &self.fields {
            Some(path) => FieldSource::File(path.clone()),
            None => FieldSource::Preset(match self.preset {
                PresetArg::Morphology => Preset::Morphology,
                PresetArg::Habitat => Preset::Habitat,
            }),
        };
        ValuesRequest {
            reference: self.tables.reference.clone(),
            candidate: self.tables.candidate.clone(),
            output: self.tables.output.clone(),
            name_column: self.tables.name_column.clone(),
            fields,
            trusted: self.trusted.clone(),
            fill_uncertainty: !self.no_fill_uncertainty,
            merge_into: self.merge_into.clone(),
            summary_json: self.tables.summary_json.clone(),
        }
    }
}

impl AltitudeArgs {
    pub fn to_request(&self) -> AltitudeRequest {
        AltitudeRequest {
            reference: self.tables.reference.clone(),
            candidate: self.tables.candidate.clone(),
            output: self.tables.output.clone(),
            name_column: self.tables.name_column.clone(),
            index_column: self.index_column.clone(),
            trusted: self.trusted.clone(),
            merge_into: self.merge_into.clone(),
            summary_json: self.tables.summary_json.clone(),
        }
    }
}

impl EggStyleArgs {
    pub fn to_request(&self) -> EggStyleRequest {
        let rule = if self.transitions.is_empty() {
            Preset::EggStyle.transition_rule().unwrap_or_default()
        } else {
            TransitionRule::new(self.transitions.iter().copied())
        };
        EggStyleRequest {
            reference: self.tables.reference.clone(),
            candidate: self.tables.candidate.clone(),
            confidence: self.confidence.clone(),
            output: self.tables.output.clone(),
            trusted: self.trusted.clone(),
            name_column: self.tables.name_column.clone(),
            column: self.column.clone(),
            confidence_column: self.confidence_column.clone(),
            rule,
            merge_into: self.merge_into.clone(),
            summary_json: self.tables.summary_json.clone(),
        }
    }
}
