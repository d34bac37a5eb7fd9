use crate::parsing::render_table;
use crate::report::{Report, Section, Subsection};

/// Separator used when rendering a multi-record set whose record did not
/// keep one from the source.
pub const DEFAULT_SEPARATOR: &str = "<|RELATED_DOC_SEP-0000|>";

fn render_subsection(out: &mut String, sub: &Subsection) {
    out.push_str(&sub.heading);
    out.push('\n');
    if let Some(table) = &sub.table {
        out.push('\n');
        out.push_str(&render_table(table));
        out.push('\n');
    }
}

fn render_section(out: &mut String, section: &Section) {
    if !section.heading.is_empty() {
        out.push_str(&section.heading);
        out.push('\n');
    }
    for (i, sub) in section.subsections.iter().enumerate() {
        out.push('\n');
        if i > 0 {
            out.push('\n');
        }
        render_subsection(out, sub);
    }
}

/// Serialize one report back to Markdown. Table structure (column order,
/// alignment row, `N/A` placeholders) is reproduced byte for byte; the
/// blank-line layout between blocks is the canonical one from the
/// generated corpus.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    for (i, section) in report.sections.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        render_section(&mut out, section);
    }
    out
}

/// Serialize a multi-record set, re-emitting each record's separator
/// token verbatim (or a default one when absent).
pub fn render_document(reports: &[Report]) -> String {
    let mut out = String::new();
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(report.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR));
            out.push('\n');
        }
        out.push_str(&render_report(report));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_document;

    #[test]
    fn test_render_preserves_table_bytes() {
        let input = "\
# Section 2: Financial Performance

## S2.1: Income Statement

| Field | 2024 | 2023 | 2022 | Multiplier | Currency |
| :---- | :---- | :---- | :---- | :---- | :---- |
| Revenue | 60,922.0 | 26,974.0 | 26,914.0 | Millions | USD |
| Net Profit | N/A | N/A | N/A | N/A | N/A |
";
        let outcome = parse_document(input).unwrap();
        let rendered = render_report(&outcome.reports[0]);
        for line in input.lines().filter(|l| l.starts_with('|')) {
            assert!(rendered.contains(line), "missing line: {}", line);
        }
        // full fixed-layout round trip
        assert_eq!(rendered.trim_end(), input.trim_end());
    }

    #[test]
    fn test_render_document_reemits_separator() {
        let input = "\
# Section 1: Company Overview
## S1.1: Basic Information
| Field | Value |
| :---- | :---- |
| Company Name | A |
<|RELATED_DOC_SEP-z9|>
# Section 1: Company Overview
## S1.1: Basic Information
| Field | Value |
| :---- | :---- |
| Company Name | B |
";
        let outcome = parse_document(input).unwrap();
        let rendered = render_document(&outcome.reports);
        assert!(rendered.contains("<|RELATED_DOC_SEP-z9|>"));
        // splitting the rendered output again yields two records
        let reparsed = parse_document(&rendered).unwrap();
        assert_eq!(reparsed.reports.len(), 2);
    }
}
