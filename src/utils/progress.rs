use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress display for batch runs over a directory of report files.
#[derive(Clone)]
pub struct BatchProgress {
    bar: Option<ProgressBar>,
}

impl BatchProgress {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg:>40}")
                .unwrap()
                .progress_chars("#>-"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    /// No-op tracker for quiet runs.
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    pub fn set_file(&self, name: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("Parsing [{}]", name));
        }
    }

    pub fn tick(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message("Complete");
        }
    }
}
