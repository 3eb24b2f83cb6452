//! # Statistics Module
//!
//! Questo modulo traccia le statistiche aggregate di una singola run.
//!
//! ## Responsabilità:
//! - Accumula byte originali/ottimizzati e numero di file scritti
//! - Calcola byte risparmiati e percentuale di riduzione
//! - Formattazione human-readable delle dimensioni (B, KB, MB, GB)
//!
//! ## Statistiche tracciate:
//! - **original_bytes**: Dimensione totale dei file originali
//! - **optimized_bytes**: Dimensione totale dei file ottimizzati
//! - **files_processed**: File scritti con successo (non i file scoperti)
//! - **elapsed**: Tempo dalla creazione dell'accumulatore
//!
//! ## Contratto:
//! - Un `RunStats` per invocazione, mai condiviso tra run
//! - I contatori crescono in modo monotono, mai decrementati
//! - I totali interni restano interi esatti; la percentuale è arrotondata
//!   a due decimali solo in fase di display
//!
//! ## Esempio:
//! ```
//! use static_asset_optimizer::stats::RunStats;
//!
//! let mut stats = RunStats::new();
//! stats.record(500, 300);
//! stats.record(300, 150);
//! assert_eq!(stats.savings().saved_bytes, 350);
//! ```

use std::time::Instant;

/// Running totals for one optimization run
#[derive(Debug)]
pub struct RunStats {
    pub original_bytes: u64,
    pub optimized_bytes: u64,
    pub files_processed: usize,
    started: Instant,
}

/// Savings snapshot derived from the running totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Savings {
    pub saved_bytes: i64,
    pub saved_percentage: f64,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            original_bytes: 0,
            optimized_bytes: 0,
            files_processed: 0,
            started: Instant::now(),
        }
    }

    /// Record one successfully written file
    pub fn record(&mut self, original_size: u64, optimized_size: u64) {
        self.original_bytes += original_size;
        self.optimized_bytes += optimized_size;
        self.files_processed += 1;
    }

    /// Milliseconds elapsed since the accumulator was created
    pub fn elapsed_millis(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    /// Savings derived from the current totals.
    ///
    /// `saved_bytes` can go negative when a compressor inflates its input;
    /// the percentage is 0 for an empty run.
    pub fn savings(&self) -> Savings {
        let saved_bytes = self.original_bytes as i64 - self.optimized_bytes as i64;
        let saved_percentage = if self.original_bytes == 0 {
            0.0
        } else {
            (saved_bytes as f64 / self.original_bytes as f64) * 100.0
        };
        Savings {
            saved_bytes,
            saved_percentage,
        }
    }

    pub fn format_summary(&self) -> String {
        let savings = self.savings();
        format!(
            "Processed: {} files | {} -> {} | Saved: {} ({:.2}%)",
            self.files_processed,
            format_size(self.original_bytes),
            format_size(self.optimized_bytes),
            format_signed_size(savings.saved_bytes),
            savings.saved_percentage
        )
    }
}

/// Get human-readable file size
pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Percentage reduction for a single file
pub fn reduction_percent(original_size: u64, new_size: u64) -> f64 {
    if original_size == 0 {
        0.0
    } else {
        ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
    }
}

fn format_signed_size(size: i64) -> String {
    if size < 0 {
        format!("-{}", format_size(size.unsigned_abs()))
    } else {
        format_size(size as u64)
    }
}
