//! # Progress Tracking Module
//!
//! Questo modulo gestisce il progress reporting visuale con `indicatif`.
//!
//! ## Responsabilità:
//! - Una progress bar per categoria, con percentuale e tempo elapsed
//! - Messaggi di stato per ogni file processato
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:02] [====================>-------------------] 12/24 (50%) ✅ style.css: 38.1% saved
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages the progress bar for one category loop
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager for a known number of files
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
