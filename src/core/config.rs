use anyhow::Result;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct TearsheetConfig {
    pub data_dir: PathBuf,
    /// When set, validation warnings are treated like errors by the CLI.
    pub strict: bool,
}

impl TearsheetConfig {
    pub fn from_env() -> Result<Self> {
        let data_dir = PathBuf::from(
            std::env::var("TEARSHEET_DATA_DIR").unwrap_or_else(|_| "data".to_string()),
        );

        let strict = std::env::var("TEARSHEET_STRICT")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self { data_dir, strict })
    }
}
