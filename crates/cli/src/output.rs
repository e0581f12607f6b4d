//! Terminal output. Logs go to stderr; results go to stdout.

use serde::Serialize;

use crate::commands::CliError;

/// How results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
}

impl Format {
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Table }
    }
}

/// Print one line of a result.
#[allow(clippy::print_stdout)]
pub fn line(text: &str) {
    println!("{text}");
}

/// Print a value as pretty JSON.
pub fn json<T: Serialize>(value: &T) -> Result<(), CliError> {
    line(&serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a table with left-aligned, padded columns.
pub fn table(headers: &[&str], rows: &[Vec<String>]) {
    for text in render_table(headers, rows) {
        line(&text);
    }
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: &mut dyn Iterator<Item = &str>| {
        cells
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render(&mut headers.iter().copied()));
    for row in rows {
        lines.push(render(&mut row.iter().map(String::as_str)));
    }
    lines
}

/// Print a `label: value` listing.
pub fn fields(pairs: &[(&str, String)]) {
    let width = pairs.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in pairs {
        line(&format!("{:<width$}  {value}", format!("{label}:")));
    }
}

/// Tell the operator why the command failed.
#[allow(clippy::print_stderr)]
pub fn failure(error: &CliError) {
    eprintln!("{}", error.user_message());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_pads_to_widest_cell() {
        let rows = vec![
            vec!["#1".to_string(), "Shawarma Corner".to_string(), "AED 35.30".to_string()],
            vec!["#12".to_string(), "Tea".to_string(), "N/A".to_string()],
        ];
        assert_eq!(
            render_table(&["ORDER", "STORE", "TOTAL"], &rows),
            vec![
                "ORDER  STORE            TOTAL",
                "#1     Shawarma Corner  AED 35.30",
                "#12    Tea              N/A",
            ]
        );
    }

    #[test]
    fn test_table_counts_characters_not_bytes() {
        let rows = vec![vec!["Café".to_string(), "x".to_string()]];
        assert_eq!(
            render_table(&["NAME", "V"], &rows),
            vec!["NAME  V", "Café  x"]
        );
    }

    #[test]
    fn test_table_without_rows() {
        assert_eq!(render_table(&["ID", "NAME"], &[]), vec!["ID  NAME"]);
    }
}
