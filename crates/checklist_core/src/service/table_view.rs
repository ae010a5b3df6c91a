//! Plain-text table view of output items.

use crate::model::record::OutputRecord;

const HEADERS: [&str; 6] = ["#", "Line", "Name", "Type", "UUID", "Mandatory"];

/// Renders items as an aligned text table with 1-based row numbers.
///
/// Returns only the header and rule lines when `records` is empty.
pub fn render_table(records: &[OutputRecord]) -> String {
    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            [
                (index + 1).to_string(),
                record.line.clone(),
                record.name.clone(),
                record.kind.to_string(),
                record.uuid.to_string(),
                if record.is_mandatory { "[x]" } else { "[ ]" }.to_string(),
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-");
    out.push_str(&rule);
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}
