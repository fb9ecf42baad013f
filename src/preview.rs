use crate::report::format_timestamp;
use crate::summary::ReportOutcome;
use crate::types::EntryKind;
use comfy_table::{Attribute, Cell, Color, Table};

pub fn build_table(outcome: &ReportOutcome) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Name", "Type", "Files", "Size", "Bytes", "Last Modified"]);

    for entry in &outcome.entries {
        let (kind, files) = match entry.kind {
            EntryKind::File => ("file", "-".to_string()),
            EntryKind::Directory { file_count } => ("dir", file_count.to_string()),
        };
        let modified = entry
            .last_modified
            .as_ref()
            .map_or_else(|| "-".to_string(), format_timestamp);

        table.add_row(vec![
            Cell::new(&entry.relative_name).fg(if entry.is_dir() {
                Color::Cyan
            } else {
                Color::White
            }),
            Cell::new(kind),
            Cell::new(files),
            Cell::new(human_bytes::human_bytes(entry.size_bytes as f64)),
            Cell::new(entry.size_bytes),
            Cell::new(modified).fg(if entry.last_modified.is_none() {
                Color::Yellow
            } else {
                Color::White
            }),
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(human_bytes::human_bytes(outcome.total_bytes as f64))
            .add_attribute(Attribute::Bold),
        Cell::new(outcome.total_bytes).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);

    table
}

pub fn print_preview(outcome: &ReportOutcome) {
    if outcome.entries.is_empty() {
        println!("Input directory is empty.");
        return;
    }
    println!("{}", build_table(outcome));
}
