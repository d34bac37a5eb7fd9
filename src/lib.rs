pub mod core;
pub mod export;
pub mod parsing;
pub mod query;
pub mod render;
pub mod report;
pub mod utils;
pub mod validate;

// Re-exports
pub use crate::core::TearsheetConfig;
pub use parsing::{parse_document, parse_file, ParseIssue, ParseOutcome};
pub use query::FinancialFact;
pub use render::{render_document, render_report};
pub use report::{Report, SectionKind, SubsectionId};
pub use utils::progress::BatchProgress;
pub use validate::{validate_all, validate_report, Severity, ValidationIssue};
