//! Boxed, left-aligned text table.

use console::{measure_text_width, pad_str, Alignment};

use crate::types::ResultTable;

/// Render `table` with a border around the header and the body.
///
/// # Examples
/// ```
/// use pydocs_harvester::output::render_table;
/// use pydocs_harvester::types::ResultTable;
///
/// let mut table = ResultTable::new(["Status", "Count"]);
/// table.push(["Final", "12"]);
/// assert_eq!(
///     render_table(&table),
///     "+--------+-------+\n\
///      | Status | Count |\n\
///      +--------+-------+\n\
///      | Final  | 12    |\n\
///      +--------+-------+"
/// );
/// ```
pub fn render_table(table: &ResultTable) -> String {
    let columns = table.all_rows().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in table.all_rows() {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let border = widths
        .iter()
        .fold(String::from("+"), |acc, w| acc + &"-".repeat(w + 2) + "+");

    let line = |row: &Vec<String>| {
        let mut out = String::from("|");
        for (i, width) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or_default();
            out.push(' ');
            out.push_str(&pad_str(cell, *width, Alignment::Left, None));
            out.push_str(" |");
        }
        out
    };

    let mut lines = vec![border.clone(), line(&table.header), border.clone()];
    lines.extend(table.rows.iter().map(line));
    if !table.rows.is_empty() {
        lines.push(border);
    }
    lines.join("\n")
}
