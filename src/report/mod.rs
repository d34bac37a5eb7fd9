pub mod schema;
pub mod value;

pub use schema::{SectionKind, SubsectionId, TableShape};
pub use value::{Cell, Currency, Multiplier, PLACEHOLDER};

use serde::{Deserialize, Serialize};

/// A parsed pipe table. Header cells, alignment tokens and body cells are
/// kept as raw trimmed text so the table can be re-rendered byte for byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<String>,
    /// Raw alignment row tokens, e.g. `:----` or `-----------:`. Kept
    /// verbatim; the corpus contains alignment rows whose arity does not
    /// match the header and reconciling them would break round-trips.
    pub alignment: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// First row whose label cell matches, label comparison is exact.
    pub fn row(&self, label: &str) -> Option<&Vec<String>> {
        self.rows.iter().find(|r| r.first().map(String::as_str) == Some(label))
    }

    pub fn cell(&self, label: &str, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.row(label)?.get(idx).map(String::as_str)
    }

    pub fn row_labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().filter_map(|r| r.first().map(String::as_str))
    }
}

/// One `## SX.Y: Title` block and its table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    /// Recognized id, None when the heading carries an unknown code.
    pub id: Option<SubsectionId>,
    /// The code as written, e.g. `S1.2`.
    pub code: String,
    pub title: String,
    /// The raw heading line, preserved for rendering.
    pub heading: String,
    pub table: Option<Table>,
}

/// One `# Section N: Title` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: Option<SectionKind>,
    pub number: Option<u8>,
    pub title: String,
    pub heading: String,
    pub subsections: Vec<Subsection>,
}

/// One complete report instance for one company. Immutable once parsed;
/// the format has no update or deletion semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub sections: Vec<Section>,
    /// The separator token that preceded this record in the source file,
    /// None for the first record. Re-emitted verbatim when rendering a
    /// multi-record set.
    pub separator: Option<String>,
}

impl Report {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == Some(kind))
    }

    pub fn subsection(&self, id: SubsectionId) -> Option<&Subsection> {
        self.sections
            .iter()
            .flat_map(|s| s.subsections.iter())
            .find(|sub| sub.id == Some(id))
    }

    /// Company name from S1.1, when present and not a placeholder.
    pub fn company_name(&self) -> Option<&str> {
        let table = self.subsection(SubsectionId::S1_1)?.table.as_ref()?;
        let name = table.cell("Company Name", "Value")?;
        if name == PLACEHOLDER {
            None
        } else {
            Some(name)
        }
    }

    /// Section kinds present, in document order.
    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().filter_map(|s| s.kind).collect()
    }
}
