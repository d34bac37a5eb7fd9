use serde::Serialize;
use std::fmt;
use strum::IntoEnumIterator;

use crate::report::{Report, SectionKind, SubsectionId, PLACEHOLDER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A schema deviation. Validation never fails hard: missing sections and
/// unknown rows are reported and the caller decides what to do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub record: usize,
    pub severity: Severity,
    pub location: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(
        record: usize,
        severity: Severity,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            record,
            severity,
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {}: {} [{}]: {}",
            self.record, self.severity, self.location, self.message
        )
    }
}

pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Validate one report against the fixed template: six sections in
/// order, known subsections under the right section, fixed column sets,
/// `N/A` placeholder discipline.
pub fn validate_report(report: &Report, record: usize) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    check_section_order(report, record, &mut issues);

    for section in &report.sections {
        if let Some(kind) = section.kind {
            for expected in SubsectionId::for_section(kind) {
                if !section.subsections.iter().any(|s| s.id == Some(expected)) {
                    issues.push(ValidationIssue::new(
                        record,
                        Severity::Warning,
                        expected.code(),
                        "subsection absent from its section",
                    ));
                }
            }
        }
        for sub in &section.subsections {
            let id = match sub.id {
                Some(id) => id,
                None => {
                    issues.push(ValidationIssue::new(
                        record,
                        Severity::Warning,
                        sub.code.as_str(),
                        "subsection id not in the template",
                    ));
                    continue;
                }
            };

            if section.kind.is_some() && section.kind != Some(id.section()) {
                issues.push(ValidationIssue::new(
                    record,
                    Severity::Warning,
                    id.code(),
                    format!("appears under '{}' instead of '{}'", section.title, id.section()),
                ));
            }

            if sub.title != id.title() {
                issues.push(ValidationIssue::new(
                    record,
                    Severity::Warning,
                    id.code(),
                    format!("title {:?} differs from template {:?}", sub.title, id.title()),
                ));
            }

            match &sub.table {
                Some(table) => check_table(id, table, record, &mut issues),
                None => issues.push(ValidationIssue::new(
                    record,
                    Severity::Error,
                    id.code(),
                    "subsection table is missing",
                )),
            }
        }
    }

    issues
}

fn check_section_order(report: &Report, record: usize, issues: &mut Vec<ValidationIssue>) {
    let present = report.section_kinds();

    for kind in SectionKind::iter() {
        let count = present.iter().filter(|k| **k == kind).count();
        if count == 0 {
            issues.push(ValidationIssue::new(
                record,
                Severity::Error,
                format!("Section {}", kind.number()),
                format!("missing section '{}'", kind),
            ));
        } else if count > 1 {
            issues.push(ValidationIssue::new(
                record,
                Severity::Warning,
                format!("Section {}", kind.number()),
                format!("section '{}' appears {} times", kind, count),
            ));
        }
    }

    let numbers: Vec<u8> = present.iter().map(|k| k.number()).collect();
    let mut sorted = numbers.clone();
    sorted.sort_unstable();
    if numbers != sorted {
        issues.push(ValidationIssue::new(
            record,
            Severity::Error,
            "document",
            "sections are out of the fixed order",
        ));
    }
}

fn check_table(
    id: SubsectionId,
    table: &crate::report::Table,
    record: usize,
    issues: &mut Vec<ValidationIssue>,
) {
    let shape = id.shape();
    let expected_columns = shape.columns();

    if table.header != expected_columns {
        issues.push(ValidationIssue::new(
            record,
            Severity::Error,
            id.code(),
            format!(
                "column set {:?} does not match the fixed template {:?}",
                table.header, expected_columns
            ),
        ));
    }

    if !table.alignment.is_empty() && table.alignment.len() != table.header.len() {
        issues.push(ValidationIssue::new(
            record,
            Severity::Warning,
            id.code(),
            format!(
                "alignment row has {} tokens for {} columns",
                table.alignment.len(),
                table.header.len()
            ),
        ));
    }

    for (i, row) in table.rows.iter().enumerate() {
        if row.len() != table.header.len() {
            issues.push(ValidationIssue::new(
                record,
                Severity::Warning,
                id.code(),
                format!("row {} has {} cells for {} columns", i + 1, row.len(), table.header.len()),
            ));
        }
        for cell in row {
            if cell.is_empty() {
                issues.push(ValidationIssue::new(
                    record,
                    Severity::Warning,
                    id.code(),
                    format!("row {} has an empty cell, absent data must be {:?}", i + 1, PLACEHOLDER),
                ));
                break;
            }
        }
    }

    if shape.has_fixed_rows() {
        let expected_rows = id.expected_rows();
        for label in table.row_labels() {
            if !expected_rows.contains(&label) {
                issues.push(ValidationIssue::new(
                    record,
                    Severity::Warning,
                    id.code(),
                    format!("row label {:?} not in the template vocabulary", label),
                ));
            }
        }
        for expected in expected_rows {
            if !table.row_labels().any(|l| l == *expected) {
                issues.push(ValidationIssue::new(
                    record,
                    Severity::Warning,
                    id.code(),
                    format!("expected row {:?} is absent", expected),
                ));
            }
        }
    }
}

/// Validate every record of a parsed document.
pub fn validate_all(reports: &[Report]) -> Vec<ValidationIssue> {
    reports
        .iter()
        .enumerate()
        .flat_map(|(i, r)| validate_report(r, i))
        .collect()
}
