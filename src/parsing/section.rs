use once_cell::sync::Lazy;
use regex::Regex;

use super::table::is_table_line;

// `# Section 2: Financial Performance`
static SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s+Section\s+(\d+)\s*:\s*(.+?)\s*$").unwrap());

// `## S1.2 : Core Competencies`; the corpus is inconsistent about the
// space before the colon, both forms are accepted.
static SUBSECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+(S\d+\.\d+)\s*:\s*(.+?)\s*$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct RawSubsection {
    pub heading: String,
    pub code: String,
    pub title: String,
    /// Lines of the first table block under the heading.
    pub table_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    pub heading: String,
    pub number: Option<u8>,
    pub title: String,
    pub subsections: Vec<RawSubsection>,
}

/// Walk one record's lines and segment it into sections and subsections.
/// Prose outside tables is skipped; only the first table under each
/// subsection heading is captured (the format has exactly one).
pub fn segment_record(text: &str) -> Vec<RawSection> {
    let mut sections: Vec<RawSection> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = SECTION_RE.captures(line) {
            sections.push(RawSection {
                heading: line.to_string(),
                number: caps[1].parse().ok(),
                title: caps[2].to_string(),
                subsections: Vec::new(),
            });
            continue;
        }

        if let Some(caps) = SUBSECTION_RE.captures(line) {
            let sub = RawSubsection {
                heading: line.to_string(),
                code: caps[1].to_string(),
                title: caps[2].to_string(),
                table_lines: Vec::new(),
            };
            match sections.last_mut() {
                Some(section) => section.subsections.push(sub),
                None => {
                    // Subsection before any section heading; hold it in a
                    // synthetic unnumbered section so it is not lost.
                    log::warn!("subsection heading before any section: {}", line);
                    sections.push(RawSection {
                        heading: String::new(),
                        number: None,
                        title: String::new(),
                        subsections: vec![sub],
                    });
                }
            }
            continue;
        }

        if is_table_line(line) {
            if let Some(sub) = sections
                .last_mut()
                .and_then(|s| s.subsections.last_mut())
            {
                // Append to the current block, or start it. A second,
                // disjoint table under the same heading is ignored.
                if sub.table_lines.is_empty() || contiguous(&sub.table_lines) {
                    sub.table_lines.push(line.trim().to_string());
                }
            }
        } else if !line.trim().is_empty() {
            // Prose line: terminates the current table block.
            if let Some(sub) = sections
                .last_mut()
                .and_then(|s| s.subsections.last_mut())
            {
                if !sub.table_lines.is_empty() {
                    sub.table_lines.push(String::new());
                }
            }
        }
    }

    // Strip the block terminators added above.
    for section in &mut sections {
        for sub in &mut section.subsections {
            while sub.table_lines.last().map(|l| l.is_empty()).unwrap_or(false) {
                sub.table_lines.pop();
            }
            sub.table_lines.retain(|l| !l.is_empty());
        }
    }

    sections
}

fn contiguous(table_lines: &[String]) -> bool {
    table_lines.last().map(|l| !l.is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = "\
# Section 1: Company Overview

## S1.1: Basic Information

| Field | Value |
| :---- | :---- |
| Company Name | NVIDIA Corporation |

## S1.2 : Core Competencies

| Perspective | 2024 Report | 2023 Report |
| :---- | :---- | :---- |
| Innovation Advantages | CUDA moat | N/A |
";

    #[test]
    fn test_segment_record() {
        let sections = segment_record(RECORD);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].number, Some(1));
        assert_eq!(sections[0].title, "Company Overview");
        assert_eq!(sections[0].subsections.len(), 2);
        assert_eq!(sections[0].subsections[0].code, "S1.1");
        assert_eq!(sections[0].subsections[0].table_lines.len(), 3);
        // space before the colon still parses
        assert_eq!(sections[0].subsections[1].code, "S1.2");
        assert_eq!(sections[0].subsections[1].title, "Core Competencies");
    }

    #[test]
    fn test_orphan_subsection_is_kept() {
        let sections = segment_record("## S4.1: Risk Factors\n| Perspective | 2024 Report | 2023 Report |\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].number, None);
        assert_eq!(sections[0].subsections[0].code, "S4.1");
    }
}
