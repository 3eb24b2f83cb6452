//! Adapter CSS: delega la minificazione a `css-minify`.
//!
//! Settings riconosciuti: `level` (0-3, default 1). Il livello mappa
//! direttamente su `css_minify::optimizations::Level`.

use super::CompressionAdapter;
use crate::config::CategorySettings;
use crate::error::OptimizeError;
use crate::walker::FileTask;
use css_minify::optimizations::{Level, Minifier};

pub struct CssAdapter {
    level: u8,
}

impl CssAdapter {
    pub fn new(settings: &CategorySettings) -> Self {
        Self {
            level: settings.u8_option("level", 1),
        }
    }

    fn level(&self) -> Level {
        match self.level {
            0 => Level::Zero,
            1 => Level::One,
            2 => Level::Two,
            _ => Level::Three,
        }
    }
}

impl CompressionAdapter for CssAdapter {
    fn transform(&self, task: &FileTask, input: &[u8]) -> Result<Vec<u8>, OptimizeError> {
        let source = std::str::from_utf8(input).map_err(|e| {
            OptimizeError::Compression(format!(
                "CSS file {} is not valid UTF-8: {}",
                task.relative_path.display(),
                e
            ))
        })?;

        let minified = Minifier::default()
            .minify(source, self.level())
            .map_err(|e| {
                OptimizeError::Compression(format!(
                    "CSS minification failed for {}: {:?}",
                    task.relative_path.display(),
                    e
                ))
            })?;

        Ok(minified.into_bytes())
    }
}
