pub mod config;

pub use config::TearsheetConfig;
