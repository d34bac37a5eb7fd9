use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

/// The six top-level sections of a report, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum SectionKind {
    CompanyOverview,
    FinancialPerformance,
    BusinessAnalysis,
    RiskFactors,
    CorporateGovernance,
    FutureOutlook,
}

impl SectionKind {
    pub fn number(&self) -> u8 {
        match self {
            SectionKind::CompanyOverview => 1,
            SectionKind::FinancialPerformance => 2,
            SectionKind::BusinessAnalysis => 3,
            SectionKind::RiskFactors => 4,
            SectionKind::CorporateGovernance => 5,
            SectionKind::FutureOutlook => 6,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::CompanyOverview => "Company Overview",
            SectionKind::FinancialPerformance => "Financial Performance",
            SectionKind::BusinessAnalysis => "Business Analysis",
            SectionKind::RiskFactors => "Risk Factors",
            SectionKind::CorporateGovernance => "Corporate Governance",
            SectionKind::FutureOutlook => "Future Outlook",
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        SectionKind::iter().find(|k| k.number() == n)
    }

    /// Comma-separated titles, for CLI help and diagnostics.
    pub fn list_titles() -> &'static str {
        &SECTION_TITLES
    }
}

static SECTION_TITLES: Lazy<String> = Lazy::new(|| {
    SectionKind::iter()
        .map(|k| k.title().to_string())
        .collect::<Vec<_>>()
        .join(", ")
});

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SectionKind::iter()
            .find(|k| k.title().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown section: {}", s))
    }
}

/// The fixed column layout of a subsection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableShape {
    /// `Field | Value`
    FieldValue,
    /// `Field | Answer`
    FieldAnswer,
    /// `Perspective | 2024 Report | 2023 Report`
    Narrative,
    /// Same narrative pair but labeled `Field`
    NarrativeByField,
    /// `Field | 2024 | 2023 | 2022 | Multiplier | Currency`
    Financial,
    /// Ratio table with a blank label header: ` | 2024 | 2023 | 2022`
    Metrics,
    /// `Field | 2024 | 2023 | 2022`
    YearTriple,
    /// `Name | Position | Total Income`, variable row count
    Board,
}

impl TableShape {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            TableShape::FieldValue => &["Field", "Value"],
            TableShape::FieldAnswer => &["Field", "Answer"],
            TableShape::Narrative => &["Perspective", "2024 Report", "2023 Report"],
            TableShape::NarrativeByField => &["Field", "2024 Report", "2023 Report"],
            TableShape::Financial => &["Field", "2024", "2023", "2022", "Multiplier", "Currency"],
            TableShape::Metrics => &["", "2024", "2023", "2022"],
            TableShape::YearTriple => &["Field", "2024", "2023", "2022"],
            TableShape::Board => &["Name", "Position", "Total Income"],
        }
    }

    /// Year columns carrying values, as (column index, period label).
    pub fn year_columns(&self) -> &'static [(usize, &'static str)] {
        match self {
            TableShape::Financial | TableShape::Metrics | TableShape::YearTriple => {
                &[(1, "2024"), (2, "2023"), (3, "2022")]
            }
            TableShape::Narrative | TableShape::NarrativeByField => &[(1, "2024"), (2, "2023")],
            _ => &[],
        }
    }

    pub fn has_fixed_rows(&self) -> bool {
        !matches!(self, TableShape::Board)
    }
}

/// Subsection identifiers, `S1.1` through `S6.3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[allow(non_camel_case_types)]
pub enum SubsectionId {
    S1_1,
    S1_2,
    S1_3,
    S2_1,
    S2_2,
    S2_3,
    S2_4,
    S2_5,
    S3_1,
    S3_2,
    S3_3,
    S4_1,
    S5_1,
    S5_2,
    S6_1,
    S6_2,
    S6_3,
}

impl SubsectionId {
    pub fn code(&self) -> &'static str {
        match self {
            SubsectionId::S1_1 => "S1.1",
            SubsectionId::S1_2 => "S1.2",
            SubsectionId::S1_3 => "S1.3",
            SubsectionId::S2_1 => "S2.1",
            SubsectionId::S2_2 => "S2.2",
            SubsectionId::S2_3 => "S2.3",
            SubsectionId::S2_4 => "S2.4",
            SubsectionId::S2_5 => "S2.5",
            SubsectionId::S3_1 => "S3.1",
            SubsectionId::S3_2 => "S3.2",
            SubsectionId::S3_3 => "S3.3",
            SubsectionId::S4_1 => "S4.1",
            SubsectionId::S5_1 => "S5.1",
            SubsectionId::S5_2 => "S5.2",
            SubsectionId::S6_1 => "S6.1",
            SubsectionId::S6_2 => "S6.2",
            SubsectionId::S6_3 => "S6.3",
        }
    }

    pub fn section(&self) -> SectionKind {
        match self {
            SubsectionId::S1_1 | SubsectionId::S1_2 | SubsectionId::S1_3 => {
                SectionKind::CompanyOverview
            }
            SubsectionId::S2_1
            | SubsectionId::S2_2
            | SubsectionId::S2_3
            | SubsectionId::S2_4
            | SubsectionId::S2_5 => SectionKind::FinancialPerformance,
            SubsectionId::S3_1 | SubsectionId::S3_2 | SubsectionId::S3_3 => {
                SectionKind::BusinessAnalysis
            }
            SubsectionId::S4_1 => SectionKind::RiskFactors,
            SubsectionId::S5_1 | SubsectionId::S5_2 => SectionKind::CorporateGovernance,
            SubsectionId::S6_1 | SubsectionId::S6_2 | SubsectionId::S6_3 => {
                SectionKind::FutureOutlook
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SubsectionId::S1_1 => "Basic Information",
            SubsectionId::S1_2 => "Core Competencies",
            SubsectionId::S1_3 => "Mission & Vision",
            SubsectionId::S2_1 => "Income Statement",
            SubsectionId::S2_2 => "Balance Sheet",
            SubsectionId::S2_3 => "Cash Flow Statement",
            SubsectionId::S2_4 => "Key Financial Metrics",
            SubsectionId::S2_5 => "Operating Performance",
            SubsectionId::S3_1 => "Profitability Analysis",
            SubsectionId::S3_2 => "Financial Performance Summary",
            SubsectionId::S3_3 => "Business Competitiveness",
            SubsectionId::S4_1 => "Risk Factors",
            SubsectionId::S5_1 => "Board Composition",
            SubsectionId::S5_2 => "Internal Controls",
            SubsectionId::S6_1 => "Strategic Direction",
            SubsectionId::S6_2 => "Challenges and Uncertainties",
            SubsectionId::S6_3 => "Innovation and Development Plans",
        }
    }

    pub fn shape(&self) -> TableShape {
        match self {
            SubsectionId::S1_1 | SubsectionId::S1_3 => TableShape::FieldValue,
            SubsectionId::S1_2
            | SubsectionId::S3_2
            | SubsectionId::S4_1
            | SubsectionId::S5_2
            | SubsectionId::S6_1
            | SubsectionId::S6_2
            | SubsectionId::S6_3 => TableShape::Narrative,
            SubsectionId::S2_1 | SubsectionId::S2_2 | SubsectionId::S2_3 => TableShape::Financial,
            SubsectionId::S2_4 => TableShape::Metrics,
            SubsectionId::S2_5 => TableShape::YearTriple,
            SubsectionId::S3_1 => TableShape::FieldAnswer,
            SubsectionId::S3_3 => TableShape::NarrativeByField,
            SubsectionId::S5_1 => TableShape::Board,
        }
    }

    /// Fixed row-label vocabulary, empty for variable-row tables (S5.1).
    pub fn expected_rows(&self) -> &'static [&'static str] {
        match self {
            SubsectionId::S1_1 => &["Company Name", "Establishment Date", "Headquarters Location"],
            SubsectionId::S1_2 => &[
                "Innovation Advantages",
                "Product Advantages",
                "Brand Recognition",
                "Reputation Ratings",
            ],
            SubsectionId::S1_3 => &["Mission Statement", "Vision Statement", "Core Values"],
            SubsectionId::S2_1 => &[
                "Revenue",
                "Cost of Goods Sold",
                "Gross Profit",
                "Operating Expense",
                "Operating Income",
                "Net Profit",
                "Income before income taxes",
                "Income tax expense(benefit)",
                "Interest Expense",
            ],
            SubsectionId::S2_2 => &[
                "Total Assets",
                "Current Assets",
                "Non-Current Assets",
                "Total Liabilities",
                "Current Liabilities",
                "Non-Current Liabilities",
                "Shareholders' Equity",
                "Retained Earnings",
                "Total Equity and Liabilities",
                "Inventories",
                "Prepaid Expenses",
            ],
            SubsectionId::S2_3 => &[
                "Net Cash Flow from Operations",
                "Net Cash Flow from Investing",
                "Net Cash Flow from Financing",
                "Net Increase/Decrease in Cash",
                "Dividends",
            ],
            SubsectionId::S2_4 => &[
                "Gross Margin",
                "Operating Margin",
                "Net Profit Margin",
                "Current Ratio",
                "Quick Ratio",
                "Interest Coverage",
                "Asset Turnover",
                "Debt-to-Equity",
                "Return on Equity",
                "Return on Assets",
                "Effective Tax Rate",
                "Dividend Payout Ratio",
            ],
            SubsectionId::S2_5 => &["Revenue by Product/Service", "Revenue by Geographic Region"],
            SubsectionId::S3_1 => &[
                "Revenue & Direct-Cost Dynamics",
                "Operating Efficiency",
                "External & One-Off Impact",
            ],
            SubsectionId::S3_2 => &[
                "Comprehensive financial health",
                "Profitability and earnings quality",
                "Operational efficiency",
                "Financial risk identification and early warning",
                "Future financial performance projection",
            ],
            SubsectionId::S3_3 => &["Business Model", "Market Position"],
            SubsectionId::S4_1 => &[
                "Market Risks",
                "Operational Risks",
                "Financial Risks",
                "Compliance Risks",
            ],
            SubsectionId::S5_1 => &[],
            SubsectionId::S5_2 => &[
                "Risk assessment procedures",
                "Control activities",
                "Monitoring mechanisms",
                "Identified material weaknesses or deficiencies",
                "Effectiveness",
            ],
            SubsectionId::S6_1 => &[
                "Mergers and Acquisition",
                "New technologies",
                "Organisational Restructuring",
            ],
            SubsectionId::S6_2 => &[
                "Economic challenges such as inflation, recession risks, and shifting consumer behavior that could impact revenue and profitability.",
                "Competitive pressures from both established industry players and new, disruptive market entrants that the company faces.",
            ],
            SubsectionId::S6_3 => &[
                "R&D investments, with a focus on advancing technology, improving products, and creating new solutions to cater to market trends",
                "New product launches, emphasizing the company's commitment to continuously introducing differentiated products",
            ],
        }
    }

    pub fn for_section(section: SectionKind) -> Vec<SubsectionId> {
        SubsectionId::iter()
            .filter(|id| id.section() == section)
            .collect()
    }
}

impl fmt::Display for SubsectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SubsectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        SubsectionId::iter()
            .find(|id| id.code() == wanted)
            .ok_or_else(|| format!("unknown subsection id: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order_and_numbers() {
        let numbers: Vec<u8> = SectionKind::iter().map(|k| k.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(SectionKind::from_number(4), Some(SectionKind::RiskFactors));
        assert_eq!(SectionKind::from_number(7), None);
    }

    #[test]
    fn test_subsection_roundtrip() {
        for id in SubsectionId::iter() {
            assert_eq!(id.code().parse::<SubsectionId>().unwrap(), id);
        }
        assert!("S9.9".parse::<SubsectionId>().is_err());
    }

    #[test]
    fn test_financial_shape_columns() {
        assert_eq!(
            SubsectionId::S2_1.shape().columns(),
            &["Field", "2024", "2023", "2022", "Multiplier", "Currency"]
        );
        assert_eq!(SubsectionId::S5_1.shape().columns(), &["Name", "Position", "Total Income"]);
        assert!(!SubsectionId::S5_1.shape().has_fixed_rows());
    }
}
