use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::parsing::text::normalize_text;
use crate::report::value::{format_number, Cell};
use crate::report::{Currency, Multiplier, Report, SubsectionId, TableShape, PLACEHOLDER};

/// One typed value extracted from a financial statement table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialFact {
    pub subsection: SubsectionId,
    pub field: String,
    /// Year column the value came from, e.g. `2024`.
    pub period: String,
    pub value: f64,
    pub currency: Currency,
    pub multiplier: Multiplier,
    /// Display form, e.g. `$60,922`.
    pub formatted: String,
}

impl FinancialFact {
    /// The value scaled to base units, when the multiplier is known.
    pub fn base_value(&self) -> Option<f64> {
        self.multiplier.factor().map(|f| self.value * f)
    }
}

fn format_with_currency(value: f64, currency: &Currency) -> String {
    let body = format_number(value.abs());
    if value < 0.0 {
        format!("({}{})", currency.symbol(), body)
    } else {
        format!("{}{}", currency.symbol(), body)
    }
}

/// Extract every populated numeric cell from one of the three statement
/// subsections (S2.1, S2.2, S2.3). `N/A` cells are skipped, they are
/// data, not errors.
pub fn statement_facts(report: &Report, id: SubsectionId) -> Result<Vec<FinancialFact>> {
    if id.shape() != TableShape::Financial {
        return Err(anyhow!(
            "{} is not a financial statement subsection",
            id.code()
        ));
    }
    let table = match report.subsection(id).and_then(|s| s.table.as_ref()) {
        Some(t) => t,
        None => return Ok(Vec::new()),
    };

    let currency_idx = table.column_index("Currency");
    let multiplier_idx = table.column_index("Multiplier");

    let mut facts = Vec::new();
    for row in &table.rows {
        let field = match row.first() {
            Some(f) if !f.is_empty() => f.clone(),
            _ => continue,
        };
        let currency: Currency = cell_at(row, currency_idx)
            .unwrap_or(PLACEHOLDER)
            .parse()
            .unwrap_or_else(|_| Currency::Other(PLACEHOLDER.to_string()));
        let multiplier: Multiplier = cell_at(row, multiplier_idx)
            .unwrap_or(PLACEHOLDER)
            .parse()
            .unwrap_or_else(|_| Multiplier::Other(PLACEHOLDER.to_string()));

        for (idx, period) in id.shape().year_columns() {
            let raw = match row.get(*idx) {
                Some(c) => c.as_str(),
                None => continue,
            };
            match Cell::classify(raw) {
                Cell::Placeholder => {}
                Cell::Number(value) => facts.push(FinancialFact {
                    subsection: id,
                    field: field.clone(),
                    period: (*period).to_string(),
                    value,
                    currency: currency.clone(),
                    multiplier: multiplier.clone(),
                    formatted: format_with_currency(value, &currency),
                }),
                Cell::Text(_) => log::debug!(
                    "non-numeric cell in {} row {:?} column {}: {:?}",
                    id.code(),
                    field,
                    period,
                    raw
                ),
            }
        }
    }
    Ok(facts)
}

/// All statement facts across S2.1, S2.2 and S2.3.
pub fn all_statement_facts(report: &Report) -> Result<Vec<FinancialFact>> {
    let mut facts = Vec::new();
    for id in [SubsectionId::S2_1, SubsectionId::S2_2, SubsectionId::S2_3] {
        facts.extend(statement_facts(report, id)?);
    }
    Ok(facts)
}

/// Look up a single fact by row label and year column.
pub fn fact(
    report: &Report,
    id: SubsectionId,
    field: &str,
    period: &str,
) -> Result<Option<FinancialFact>> {
    Ok(statement_facts(report, id)?
        .into_iter()
        .find(|f| f.field == field && f.period == period))
}

/// Narrative cell from a year-keyed perspective table, normalized for
/// downstream consumption. Returns None for placeholders.
pub fn narrative(report: &Report, id: SubsectionId, label: &str, column: &str) -> Option<String> {
    let table = report.subsection(id)?.table.as_ref()?;
    let raw = table.cell(label, column)?;
    if Cell::classify(raw).is_placeholder() {
        return None;
    }
    Some(normalize_text(raw))
}

fn cell_at<'a>(row: &'a [String], idx: Option<usize>) -> Option<&'a str> {
    idx.and_then(|i| row.get(i)).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_document;

    const NVIDIA: &str = "\
# Section 2: Financial Performance

## S2.1: Income Statement

| Field | 2024 | 2023 | 2022 | Multiplier | Currency |
| :---- | :---- | :---- | :---- | :---- | :---- |
| Revenue | 60,922.0 | 26,974.0 | 26,914.0 | Millions | USD |
| Net Profit | 29,760.0 | 4,368.0 | 9,752.0 | Millions | USD |
| Interest Expense | (257.0) | N/A | N/A | Millions | USD |
";

    fn report() -> Report {
        parse_document(NVIDIA).unwrap().reports.remove(0)
    }

    #[test]
    fn test_nvidia_revenue_2024() {
        let f = fact(&report(), SubsectionId::S2_1, "Revenue", "2024")
            .unwrap()
            .unwrap();
        assert_eq!(f.value, 60922.0);
        assert_eq!(f.currency, Currency::Usd);
        assert_eq!(f.multiplier, Multiplier::Millions);
        assert_eq!(f.formatted, "$60,922");
        assert_eq!(f.base_value(), Some(60_922_000_000.0));
    }

    #[test]
    fn test_placeholder_cells_are_skipped() {
        let facts = statement_facts(&report(), SubsectionId::S2_1).unwrap();
        // Interest Expense contributes only the 2024 value
        let interest: Vec<_> = facts
            .iter()
            .filter(|f| f.field == "Interest Expense")
            .collect();
        assert_eq!(interest.len(), 1);
        assert_eq!(interest[0].value, -257.0);
        assert_eq!(interest[0].formatted, "($257)");
    }

    #[test]
    fn test_non_financial_subsection_rejected() {
        assert!(statement_facts(&report(), SubsectionId::S1_2).is_err());
    }

    #[test]
    fn test_missing_subsection_yields_empty() {
        let facts = statement_facts(&report(), SubsectionId::S2_3).unwrap();
        assert!(facts.is_empty());
    }

    const RISKS: &str = "\
# Section 4: Risk Factors
## S4.1: Risk Factors
| Perspective | 2024 Report | 2023 Report |
| :---- | :---- | :---- |
| Market Risks | ＦＸ  headwinds in  Asia | N/A |
| Financial Risks | N/A | N/A |
";

    #[test]
    fn test_narrative_lookup_is_normalized() {
        let report = parse_document(RISKS).unwrap().reports.remove(0);
        // fullwidth letters fold to ASCII, runs of spaces collapse
        assert_eq!(
            narrative(&report, SubsectionId::S4_1, "Market Risks", "2024 Report"),
            Some("FX headwinds in Asia".to_string())
        );
    }

    #[test]
    fn test_narrative_placeholder_is_none() {
        let report = parse_document(RISKS).unwrap().reports.remove(0);
        assert_eq!(
            narrative(&report, SubsectionId::S4_1, "Financial Risks", "2024 Report"),
            None
        );
        assert_eq!(
            narrative(&report, SubsectionId::S4_1, "No Such Row", "2024 Report"),
            None
        );
    }

    #[test]
    fn test_all_statement_facts_spans_statements() {
        let input = format!(
            "{}\n## S2.3: Cash Flow Statement\n\n\
             | Field | 2024 | 2023 | 2022 | Multiplier | Currency |\n\
             | :---- | :---- | :---- | :---- | :---- | :---- |\n\
             | Dividends | 395.0 | 398.0 | N/A | Millions | USD |\n",
            NVIDIA
        );
        let report = parse_document(&input).unwrap().reports.remove(0);
        let facts = all_statement_facts(&report).unwrap();
        // seven populated S2.1 cells plus two S2.3 cells
        assert_eq!(facts.len(), 9);
        assert!(facts
            .iter()
            .any(|f| f.subsection == SubsectionId::S2_3 && f.field == "Dividends"));
    }
}
