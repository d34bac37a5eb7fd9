use anyhow::{anyhow, Result};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::report::Table;

static ALIGNMENT_CELL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:?-+:?$").unwrap());

/// True for lines that belong to a pipe table block.
pub fn is_table_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.matches('|').count() >= 2
}

/// Split one `| a | b |` line into trimmed cells.
pub fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

fn is_alignment_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| ALIGNMENT_CELL_RE.is_match(c))
}

/// Parse a contiguous block of pipe-table lines. The first line is the
/// header; an alignment row, when present, follows it. Rows whose cell
/// count differs from the header are kept as-is, the caller decides
/// whether that is worth reporting.
pub fn parse_table(lines: &[&str]) -> Result<Table> {
    let table_lines: Vec<&str> = lines.iter().copied().filter(|l| is_table_line(l)).collect();
    if table_lines.is_empty() {
        return Err(anyhow!("no table lines in block"));
    }

    let header = split_cells(table_lines[0]);
    let mut alignment = Vec::new();
    let mut body_start = 1;

    if table_lines.len() > 1 {
        let second = split_cells(table_lines[1]);
        if is_alignment_row(&second) {
            alignment = second;
            body_start = 2;
        }
    }

    let rows = table_lines[body_start..]
        .iter()
        .map(|l| split_cells(l))
        .collect();

    Ok(Table {
        header,
        alignment,
        rows,
    })
}

fn render_line(cells: &[String]) -> String {
    format!("| {} |", cells.iter().join(" | "))
}

/// Render a table back to pipe-table Markdown. For tables parsed from
/// the canonical `| a | b |` layout this reproduces the input bytes,
/// including the alignment row exactly as it appeared.
pub fn render_table(table: &Table) -> String {
    let mut out = String::new();
    out.push_str(&render_line(&table.header));
    if !table.alignment.is_empty() {
        out.push('\n');
        out.push_str(&render_line(&table.alignment));
    }
    for row in &table.rows {
        out.push('\n');
        out.push_str(&render_line(row));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCOME: &str = "\
| Field | 2024 | 2023 | 2022 | Multiplier | Currency |
| :---- | :---- | :---- | :---- | :---- | :---- |
| Revenue | 60,922 | 26,974 | 26,914 | Millions | USD |
| Net Profit | 29,760 | 4,368 | 9,752 | Millions | USD |";

    #[test]
    fn test_parse_income_table() {
        let lines: Vec<&str> = INCOME.lines().collect();
        let table = parse_table(&lines).unwrap();
        assert_eq!(
            table.header,
            vec!["Field", "2024", "2023", "2022", "Multiplier", "Currency"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell("Revenue", "2024"), Some("60,922"));
        assert_eq!(table.cell("Net Profit", "Currency"), Some("USD"));
    }

    #[test]
    fn test_roundtrip_is_byte_identical() {
        let lines: Vec<&str> = INCOME.lines().collect();
        let table = parse_table(&lines).unwrap();
        assert_eq!(render_table(&table), INCOME);
    }

    #[test]
    fn test_mismatched_alignment_row_kept_verbatim() {
        // S2.4 in the corpus carries six alignment tokens over four columns.
        let block = "\
|       | 2024 | 2023 | 2022 |
| :---- | :---- | :---- | :---- | :---- | :---- |
| Gross Margin | 72.7% | 56.9% | 64.9% |";
        let lines: Vec<&str> = block.lines().collect();
        let table = parse_table(&lines).unwrap();
        assert_eq!(table.header.len(), 4);
        assert_eq!(table.alignment.len(), 6);
        let rendered = render_table(&table);
        assert!(rendered.contains("| :---- | :---- | :---- | :---- | :---- | :---- |"));
    }

    #[test]
    fn test_not_a_table() {
        assert!(parse_table(&["just some prose"]).is_err());
        assert!(!is_table_line("no pipes here"));
    }
}
