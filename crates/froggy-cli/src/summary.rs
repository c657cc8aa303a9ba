use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use froggy_cli::types::RunResult;
use froggy_compare::{ConfidenceReport, OutcomeCounts};
use froggy_model::Preset;

pub fn print_summary(result: &RunResult) {
    println!("Command: {}", result.command);
    println!("Output: {}", result.output.display());
    if let Some(path) = &result.summary_json {
        println!("Summary JSON: {}", path.display());
    }
    if let Some(dropped) = result.untrusted_dropped {
        println!("Reference rows outside the trusted list: {dropped}");
    }
    if result.candidate_dropped > 0 {
        println!(
            "Candidate rows without a reference counterpart: {}",
            result.candidate_dropped
        );
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Exact"),
        header_cell("Match"),
        header_cell("Overlap"),
        header_cell("Invalid"),
        header_cell("Unavailable"),
        header_cell("Agreement"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for field in &result.summary.fields {
        let mut row = vec![
            Cell::new(&field.field)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(field.kind.label()),
        ];
        row.extend(count_cells(&field.counts));
        table.add_row(row);
    }
    let totals = &result.summary.totals;
    let mut total_row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} rows", result.summary.rows))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    total_row.extend(
        count_cells(totals)
            .into_iter()
            .map(|cell| cell.add_attribute(Attribute::Bold)),
    );
    table.add_row(total_row);
    println!("{table}");

    if let Some(report) = &result.confidence {
        print_confidence_table(report);
    }
}

fn print_confidence_table(report: &ConfidenceReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Prediction"),
        header_cell("Rows"),
        header_cell("Scored"),
        header_cell("Mean confidence"),
    ]);
    apply_table_style(&mut table);
    for index in 1..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new("correct").fg(Color::Green),
        Cell::new(report.correct),
        Cell::new(report.correct_confidences.len()),
        mean_cell(report.mean_correct()),
    ]);
    table.add_row(vec![
        Cell::new("incorrect").fg(Color::Red),
        Cell::new(report.incorrect),
        Cell::new(report.incorrect_confidences.len()),
        mean_cell(report.mean_incorrect()),
    ]);
    table.add_row(vec![
        dim_cell("unavailable"),
        dim_cell(report.unavailable),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!();
    println!("Confidence ({}):", report.field);
    println!("{table}");
}

/// Prints every built-in preset with its fields.
pub fn print_presets() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Preset"),
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    for preset in Preset::all() {
        for (index, field) in preset.fields().into_iter().enumerate() {
            let preset_cell = if index == 0 {
                Cell::new(preset.label())
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                preset_cell,
                Cell::new(field.name),
                Cell::new(field.kind.label()),
                Cell::new(field.columns.join(" | ")),
            ]);
        }
    }
    println!("{table}");
    for preset in Preset::all() {
        println!("{:>12}: {}", preset.label(), preset.description());
    }
}

fn count_cells(counts: &OutcomeCounts) -> Vec<Cell> {
    vec![
        count_cell(counts.exact, Color::Green),
        count_cell(counts.matched, Color::Green),
        count_cell(counts.overlap, Color::Yellow),
        count_cell(counts.invalid, Color::Red),
        count_cell(counts.unavailable, Color::DarkGrey),
        rate_cell(counts.agreement_rate()),
    ]
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn rate_cell(rate: Option<f64>) -> Cell {
    match rate {
        Some(rate) => Cell::new(format!("{:.1}%", rate * 100.0)),
        None => dim_cell("n/a"),
    }
}

fn mean_cell(mean: Option<f64>) -> Cell {
    match mean {
        Some(mean) => Cell::new(format!("{mean:.3}")),
        None => dim_cell("n/a"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
