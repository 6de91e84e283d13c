use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use twb_core::{MappingValidation, RemapOutcome};

pub fn print_remap_summary(outcome: &RemapOutcome) {
    println!("Output: {}", outcome.output_path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Original"),
        header_cell("Replacement"),
        header_cell("Replacements"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in outcome.per_rule.entries() {
        table.add_row(vec![
            Cell::new(&entry.original),
            Cell::new(&entry.replacement),
            count_cell(entry.occurrences),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} rules", outcome.rule_count)),
        Cell::new(outcome.total_replacements).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if outcome.total_replacements == 0 {
        eprintln!(
            "warning: no replacements were made; the mapping may name dimensions \
             that do not exist in the workbook"
        );
    }
}

pub fn print_mapping_rules(validation: &MappingValidation) {
    println!("Mapping file is valid with {} mappings", validation.rules.len());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Original"),
        header_cell("Replacement"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, rule) in validation.rules.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&rule.original),
            Cell::new(&rule.replacement),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
