use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use froggy_compare::{
    CompareOptions, ComparisonSummary, ComparisonTable, ConfidenceReport, compare_by_index,
    compare_by_name, fold_confidence,
};
use froggy_ingest::{
    confidence_scores, fill_missing, load_field_specs, load_name_list, load_records,
    read_csv_table, restrict_to_reference,
};
use froggy_model::{FieldKind, FieldSpec, Preset, RecordTable};
use froggy_output::{
    merge_columns, merge_columns_by_name, write_comparison_csv, write_frame_csv, write_summary_json,
};

use crate::types::{AltitudeRequest, EggStyleRequest, FieldSource, RunResult, ValuesRequest};

fn load_table(path: &Path, name_column: &str, role: &str) -> Result<RecordTable> {
    load_records(path, name_column)
        .with_context(|| format!("load {role} table {}", path.display()))
}

fn load_trusted(path: Option<&Path>) -> Result<Option<BTreeSet<String>>> {
    path.map(|path| {
        load_name_list(path).with_context(|| format!("load trusted names {}", path.display()))
    })
    .transpose()
}

/// Restricts `reference` to the trusted names in `path`, if given.
fn apply_trusted(reference: &mut RecordTable, path: Option<&Path>) -> Result<Option<usize>> {
    let Some(names) = load_trusted(path)? else {
        return Ok(None);
    };
    let dropped = reference.retain_names(&names);
    info!(
        trusted = names.len(),
        kept = reference.len(),
        dropped,
        "applied trusted-name list"
    );
    Ok(Some(dropped))
}

/// Uncertainty columns of the value ± uncertainty fields.
pub fn uncertainty_columns(specs: &[FieldSpec]) -> Vec<&str> {
    specs
        .iter()
        .filter(|spec| spec.kind == FieldKind::ValueUncertainty)
        .filter_map(|spec| spec.columns.get(1).map(String::as_str))
        .collect()
}

/// How comparison columns are folded into an existing result sheet.
enum MergeKey<'a> {
    Name(&'a str),
    Position,
}

/// Writes `table` to `output`, or folds it into `merge_into` and writes that.
fn write_result(
    table: &ComparisonTable,
    output: &Path,
    merge_into: Option<&Path>,
    key: MergeKey<'_>,
) -> Result<()> {
    let Some(base_path) = merge_into else {
        return write_comparison_csv(table, output)
            .with_context(|| format!("write {}", output.display()));
    };
    let mut base = read_csv_table(base_path)
        .with_context(|| format!("load result sheet {}", base_path.display()))?;
    let merged = match key {
        MergeKey::Name(column) => merge_columns_by_name(&mut base, table, column).map(|_| ()),
        MergeKey::Position => merge_columns(&mut base, table),
    };
    merged.with_context(|| format!("merge results into {}", base_path.display()))?;
    write_frame_csv(&mut base, output).with_context(|| format!("write {}", output.display()))
}

fn write_summary(
    path: Option<&Path>,
    summary: &ComparisonSummary,
    confidence: Option<&ConfidenceReport>,
) -> Result<()> {
    if let Some(path) = path {
        write_summary_json(std::slice::from_ref(summary), confidence, path)
            .with_context(|| format!("write summary {}", path.display()))?;
    }
    Ok(())
}

pub fn run_values(request: &ValuesRequest) -> Result<RunResult> {
    let span = info_span!("values", reference = %request.reference.display());
    let _guard = span.enter();

    let specs = match &request.fields {
        FieldSource::Preset(preset) => preset.fields(),
        FieldSource::File(path) => load_field_specs(path)
            .with_context(|| format!("load field specs {}", path.display()))?,
    };
    let mut reference = load_table(&request.reference, &request.name_column, "reference")?;
    let mut candidate = load_table(&request.candidate, &request.name_column, "candidate")?;

    let untrusted_dropped = apply_trusted(&mut reference, request.trusted.as_deref())?;
    if request.fill_uncertainty {
        fill_missing(&mut reference, &uncertainty_columns(&specs), 0.0);
    }
    let candidate_dropped = restrict_to_reference(&mut candidate, &reference);

    let table = compare_by_name(&reference, &candidate, &specs, &CompareOptions::default())
        .context("compare tables")?;
    write_result(
        &table,
        &request.output,
        request.merge_into.as_deref(),
        MergeKey::Name(&request.name_column),
    )?;

    let summary = table.summary();
    write_summary(request.summary_json.as_deref(), &summary, None)?;
    Ok(RunResult {
        command: "values",
        output: request.output.clone(),
        summary,
        confidence: None,
        untrusted_dropped,
        candidate_dropped,
        summary_json: request.summary_json.clone(),
    })
}

pub fn run_altitude(request: &AltitudeRequest) -> Result<RunResult> {
    let span = info_span!("altitude", reference = %request.reference.display());
    let _guard = span.enter();

    let spec = Preset::Altitude
        .fields()
        .into_iter()
        .next()
        .context("altitude preset has no field")?;
    let mut reference = load_table(&request.reference, &request.name_column, "reference")?;
    let mut candidate = load_table(&request.candidate, &request.name_column, "candidate")?;

    let mut untrusted_dropped = None;
    let mut candidate_dropped = 0;
    if let Some(names) = load_trusted(request.trusted.as_deref())? {
        untrusted_dropped = Some(reference.retain_names(&names));
        candidate_dropped = candidate.retain_names(&names);
        info!(
            kept = reference.len(),
            candidate_kept = candidate.len(),
            "applied trusted-name list to both altitude tables"
        );
    }

    let options = CompareOptions::default().with_index_column(request.index_column.as_str());
    let table = compare_by_index(&reference, &candidate, &spec, &options)
        .context("compare altitude rows")?;
    write_result(
        &table,
        &request.output,
        request.merge_into.as_deref(),
        MergeKey::Position,
    )?;

    let summary = table.summary();
    write_summary(request.summary_json.as_deref(), &summary, None)?;
    Ok(RunResult {
        command: "altitude",
        output: request.output.clone(),
        summary,
        confidence: None,
        untrusted_dropped,
        candidate_dropped,
        summary_json: request.summary_json.clone(),
    })
}

pub fn run_egg_style(request: &EggStyleRequest) -> Result<RunResult> {
    let span = info_span!("egg_style", reference = %request.reference.display());
    let _guard = span.enter();

    let mut reference = load_table(&request.reference, &request.name_column, "reference")?;
    let candidate = load_table(&request.candidate, &request.name_column, "candidate")?;
    let untrusted_dropped = apply_trusted(&mut reference, request.trusted.as_deref())?;

    let confidence_path = request.confidence.as_deref().unwrap_or(&request.candidate);
    let confidence_table = load_table(confidence_path, &request.name_column, "confidence")?;
    let scores = confidence_scores(&confidence_table, &request.confidence_column)
        .with_context(|| format!("read confidence scores from {}", confidence_path.display()))?;

    let (table, report) = fold_confidence(
        &reference,
        &candidate,
        &request.column,
        &request.rule,
        &scores,
    )
    .context("compare egg styles")?;
    write_result(
        &table,
        &request.output,
        request.merge_into.as_deref(),
        MergeKey::Name(&request.name_column),
    )?;

    let summary = table.summary();
    write_summary(request.summary_json.as_deref(), &summary, Some(&report))?;
    let candidate_dropped = candidate
        .names()
        .filter(|name| !reference.contains(name))
        .count();
    Ok(RunResult {
        command: "egg-style",
        output: request.output.clone(),
        summary,
        confidence: Some(report),
        untrusted_dropped,
        candidate_dropped,
        summary_json: request.summary_json.clone(),
    })
}
