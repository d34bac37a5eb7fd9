use anyhow::Result;
use std::io::Write;

use crate::report::Report;

/// JSON export of parsed records.
pub fn to_json(reports: &[Report], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(reports)?
    } else {
        serde_json::to_string(reports)?
    };
    Ok(json)
}

/// Flat CSV export: one output row per table cell, keyed by record,
/// section, subsection, row label and column. Placeholders are exported
/// as the literal `N/A` they are.
pub fn write_csv<W: Write>(reports: &[Report], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["record", "section", "subsection", "row", "column", "value"])?;

    for (record_idx, report) in reports.iter().enumerate() {
        for section in &report.sections {
            for sub in &section.subsections {
                let table = match &sub.table {
                    Some(t) => t,
                    None => continue,
                };
                for row in &table.rows {
                    let label = row.first().map(String::as_str).unwrap_or("");
                    for (col_idx, cell) in row.iter().enumerate().skip(1) {
                        let column = table
                            .header
                            .get(col_idx)
                            .map(String::as_str)
                            .unwrap_or("");
                        wtr.write_record([
                            record_idx.to_string().as_str(),
                            section.title.as_str(),
                            sub.code.as_str(),
                            label,
                            column,
                            cell.as_str(),
                        ])?;
                    }
                }
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv(reports: &[Report]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(reports, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_document;

    const INPUT: &str = "\
# Section 1: Company Overview
## S1.1: Basic Information
| Field | Value |
| :---- | :---- |
| Company Name | Chemring Group PLC |
| Establishment Date | N/A |
";

    #[test]
    fn test_csv_export() {
        let outcome = parse_document(INPUT).unwrap();
        let csv = to_csv(&outcome.reports).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "record,section,subsection,row,column,value"
        );
        assert!(csv.contains("0,Company Overview,S1.1,Company Name,Value,Chemring Group PLC"));
        assert!(csv.contains("0,Company Overview,S1.1,Establishment Date,Value,N/A"));
    }

    #[test]
    fn test_json_export_roundtrips() {
        let outcome = parse_document(INPUT).unwrap();
        let json = to_json(&outcome.reports, true).unwrap();
        let back: Vec<Report> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome.reports);
    }
}
