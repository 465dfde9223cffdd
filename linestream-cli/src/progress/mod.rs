//! Progress reporting module

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Byte-level progress across all input files
///
/// The bar is only created when enabled; every other method is a no-op
/// otherwise, so callers never need to check.
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    enabled: bool,
    completed_bytes: u64,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self {
            progress_bar: None,
            enabled,
            completed_bytes: 0,
        }
    }

    /// Initialize the progress bar for `total_bytes` of input
    pub fn init_bytes(&mut self, total_bytes: u64) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let pb = ProgressBar::new(total_bytes);
        pb.set_style(
            ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}",
            )?
            .progress_chars("##-"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
        Ok(())
    }

    /// Record how far into the current file the stream has read
    pub fn file_progress(&self, bytes_processed: u64) {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(self.completed_bytes + bytes_processed);
        }
    }

    /// Mark the current file as done, counting all of its bytes
    ///
    /// Files abandoned early (for example by a line limit) still count in
    /// full so the bar reaches its end.
    pub fn file_completed(&mut self, filename: &str, file_size: u64) {
        self.completed_bytes += file_size;
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Read: {}", filename));
            pb.set_position(self.completed_bytes);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }

    /// Bytes accounted for by completed files
    pub fn completed_bytes(&self) -> u64 {
        self.completed_bytes
    }
}
