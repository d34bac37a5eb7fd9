use anyhow::Result;
use std::fs;
use std::path::Path;

/// Create an output directory and its parents. Paths come from the
/// caller (CLI flag or `TearsheetConfig::data_dir`), nothing is
/// hardcoded here.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}
