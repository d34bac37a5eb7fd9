pub mod section;
pub mod split;
pub mod table;
pub mod text;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::report::{Report, Section, SectionKind, Subsection, SubsectionId};

pub use split::{split_records, RecordSegment};
pub use table::{parse_table, render_table};

/// A non-fatal problem found while parsing. Missing or malformed
/// sections are skipped and reported here; coverage varies by company
/// and year, so none of this stops the parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseIssue {
    /// Zero-based record index within the source file.
    pub record: usize,
    /// Where the problem was seen, e.g. `S2.1` or `Section 3`.
    pub location: String,
    pub message: String,
}

impl ParseIssue {
    fn new(record: usize, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record,
            location: location.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParseOutcome {
    pub reports: Vec<Report>,
    pub issues: Vec<ParseIssue>,
}

/// Parse a whole document: clean, split on the record delimiter, parse
/// every record. Fails only when nothing in the input is recognizable as
/// a report.
pub fn parse_document(input: &str) -> Result<ParseOutcome> {
    let cleaned = text::clean_markdown(input);
    let mut reports = Vec::new();
    let mut issues = Vec::new();

    for (idx, segment) in split_records(&cleaned).iter().enumerate() {
        let (report, mut record_issues) = parse_record(segment.text, idx);
        issues.append(&mut record_issues);
        if report.sections.is_empty() {
            log::warn!("record {} contains no recognizable sections, skipping", idx);
            issues.push(ParseIssue::new(idx, "record", "no recognizable sections"));
            continue;
        }
        let mut report = report;
        report.separator = segment.separator.map(str::to_string);
        reports.push(report);
    }

    if reports.is_empty() {
        return Err(anyhow!("no parseable report records in input"));
    }
    Ok(ParseOutcome { reports, issues })
}

pub fn parse_file(path: &Path) -> Result<ParseOutcome> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(&input).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse one record segment into a `Report`. Unknown section numbers,
/// unknown subsection codes and unparseable tables become issues, never
/// errors; `N/A` cells are ordinary data.
pub fn parse_record(record_text: &str, record_idx: usize) -> (Report, Vec<ParseIssue>) {
    let mut issues = Vec::new();
    let mut sections = Vec::new();

    for raw in section::segment_record(record_text) {
        let kind = raw.number.and_then(SectionKind::from_number);
        if kind.is_none() && !raw.heading.is_empty() {
            issues.push(ParseIssue::new(
                record_idx,
                raw.heading.clone(),
                "unrecognized section number",
            ));
        }

        let mut subsections = Vec::new();
        for raw_sub in raw.subsections {
            let id = raw_sub.code.parse::<SubsectionId>().ok();
            if id.is_none() {
                issues.push(ParseIssue::new(
                    record_idx,
                    raw_sub.code.clone(),
                    "unknown subsection id",
                ));
            }

            let table = if raw_sub.table_lines.is_empty() {
                issues.push(ParseIssue::new(
                    record_idx,
                    raw_sub.code.clone(),
                    "subsection has no table",
                ));
                None
            } else {
                let lines: Vec<&str> = raw_sub.table_lines.iter().map(String::as_str).collect();
                match parse_table(&lines) {
                    Ok(t) => Some(t),
                    Err(e) => {
                        issues.push(ParseIssue::new(
                            record_idx,
                            raw_sub.code.clone(),
                            format!("malformed table: {}", e),
                        ));
                        None
                    }
                }
            };

            subsections.push(Subsection {
                id,
                code: raw_sub.code,
                title: raw_sub.title,
                heading: raw_sub.heading,
                table,
            });
        }

        sections.push(Section {
            kind,
            number: raw.number,
            title: raw.title,
            heading: raw.heading,
            subsections,
        });
    }

    (
        Report {
            sections,
            separator: None,
        },
        issues,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_two_records() {
        let input = "\
# Section 1: Company Overview
## S1.1: Basic Information
| Field | Value |
| :---- | :---- |
| Company Name | Chemring Group PLC |
<|RELATED_DOC_SEP-77|>
# Section 1: Company Overview
## S1.1: Basic Information
| Field | Value |
| :---- | :---- |
| Company Name | Singapore Airlines |
";
        let outcome = parse_document(input).unwrap();
        assert_eq!(outcome.reports.len(), 2);
        assert_eq!(outcome.reports[0].company_name(), Some("Chemring Group PLC"));
        assert_eq!(outcome.reports[1].company_name(), Some("Singapore Airlines"));
        assert_eq!(
            outcome.reports[1].separator.as_deref(),
            Some("<|RELATED_DOC_SEP-77|>")
        );
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_missing_table_is_nonfatal() {
        let input = "# Section 4: Risk Factors\n## S4.1: Risk Factors\nno table here\n";
        let outcome = parse_document(input).unwrap();
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].location, "S4.1");
    }

    #[test]
    fn test_unparseable_input_is_an_error() {
        assert!(parse_document("just prose, nothing report-shaped").is_err());
    }

    #[test]
    fn test_unknown_subsection_is_reported() {
        let input = "# Section 1: Company Overview\n## S1.9: Mystery\n| Field | Value |\n| :---- | :---- |\n| X | N/A |\n";
        let outcome = parse_document(input).unwrap();
        assert!(outcome
            .issues
            .iter()
            .any(|i| i.location == "S1.9" && i.message == "unknown subsection id"));
        // the subsection itself is kept, with its table
        assert!(outcome.reports[0].sections[0].subsections[0].table.is_some());
    }
}
