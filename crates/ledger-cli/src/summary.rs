//! Human-readable rendering of analysis, preview, and commit results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ledger_analyze::PatternDefinition;
use ledger_model::{ImportAnalysis, ImportPreview};
use ledger_preview::ImportOutcome;

pub fn print_analysis(analysis: &ImportAnalysis) {
    println!("File: {} ({} bytes)", analysis.file_name, analysis.file_size);
    println!(
        "Overall pattern: {} (confidence {:.0}%)",
        analysis.overall_pattern,
        analysis.confidence * 100.0
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Pattern"),
        header_cell("Confidence"),
        header_cell("Mapped fields"),
    ]);
    apply_table_style(&mut table);
    align_right(&mut table, &[1, 2, 4, 5]);
    for sheet in &analysis.sheets {
        table.add_row(vec![
            Cell::new(&sheet.name),
            Cell::new(sheet.row_count),
            Cell::new(sheet.column_count),
            pattern_cell(sheet.detected_pattern.as_str()),
            Cell::new(format!("{:.0}%", sheet.confidence * 100.0)),
            Cell::new(sheet.mapping.len()),
        ]);
    }
    println!("{table}");

    print_warnings(&analysis.warnings);
}

pub fn print_preview(preview: &ImportPreview) {
    print_analysis(&preview.analysis);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Target"),
        header_cell("Rows"),
        header_cell("Valid"),
        header_cell("Invalid"),
    ]);
    apply_table_style(&mut table);
    align_right(&mut table, &[2, 3, 4]);
    for sheet in &preview.mapped_data {
        table.add_row(vec![
            Cell::new(&sheet.sheet_name),
            pattern_cell(sheet.target_table.as_str()),
            Cell::new(sheet.record_count),
            Cell::new(sheet.valid_records).fg(Color::Green),
            count_cell(sheet.invalid_records, Color::Red),
        ]);
    }
    println!("{table}");

    for sheet in &preview.mapped_data {
        for entry in &sheet.validation_errors {
            println!(
                "  {} row {}: {}",
                sheet.sheet_name,
                entry.row,
                entry.errors.join("; ")
            );
        }
    }

    let changes = &preview.estimated_changes;
    println!("Estimated changes:");
    for (label, count) in [
        ("new sales", changes.new_sales),
        ("new purchases", changes.new_purchases),
        ("new companies", changes.new_companies),
        ("new suppliers", changes.new_suppliers),
        ("new hotels", changes.new_hotels),
        ("new payments", changes.new_payments),
    ] {
        if count > 0 {
            println!("  {label}: {count}");
        }
    }
}

pub fn print_outcome(outcome: &ImportOutcome) {
    println!("Committed rows: {}", outcome.success);
    println!("Rejected rows: {}", outcome.errors.len());
    for entry in &outcome.errors {
        println!("  row {}: {}", entry.row, entry.errors.join("; "));
    }
    for (label, count) in [
        ("new hotels", outcome.new_hotels),
        ("new suppliers", outcome.new_suppliers),
        ("new companies", outcome.new_companies),
        ("new sales", outcome.new_sales),
        ("new purchases", outcome.new_purchases),
        ("new payments", outcome.new_payments),
    ] {
        if count > 0 {
            println!("  {label}: {count}");
        }
    }
}

pub fn print_patterns(patterns: &[PatternDefinition]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pattern"),
        header_cell("Required fields"),
        header_cell("Keywords"),
        header_cell("Ceiling"),
    ]);
    apply_table_style(&mut table);
    align_right(&mut table, &[3]);
    for pattern in patterns {
        table.add_row(vec![
            pattern_cell(pattern.kind.as_str()),
            Cell::new(pattern.required_fields.join(", ")),
            Cell::new(pattern.keywords.join(", ")),
            Cell::new(format!("{:.1}", pattern.base_confidence)),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        println!("warning: {warning}");
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn pattern_cell(name: &str) -> Cell {
    if name == "unknown" {
        Cell::new(name).fg(Color::Yellow)
    } else {
        Cell::new(name).fg(Color::Green)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn align_right(table: &mut Table, columns: &[usize]) {
    for idx in columns {
        if let Some(column) = table.column_mut(*idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}
