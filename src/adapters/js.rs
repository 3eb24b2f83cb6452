//! Adapter JS: delega la minificazione a `minify-js`.
//!
//! Settings riconosciuti: `module` (bool, default false). Quando true il
//! sorgente viene parsato come ES module invece che come script globale.

use super::CompressionAdapter;
use crate::config::CategorySettings;
use crate::error::OptimizeError;
use crate::walker::FileTask;
use minify_js::{minify, Session, TopLevelMode};

pub struct JsAdapter {
    module: bool,
}

impl JsAdapter {
    pub fn new(settings: &CategorySettings) -> Self {
        Self {
            module: settings.bool_option("module", false),
        }
    }

    fn top_level_mode(&self) -> TopLevelMode {
        if self.module {
            TopLevelMode::Module
        } else {
            TopLevelMode::Global
        }
    }
}

impl CompressionAdapter for JsAdapter {
    fn transform(&self, task: &FileTask, input: &[u8]) -> Result<Vec<u8>, OptimizeError> {
        let session = Session::new();
        let mut output = Vec::with_capacity(input.len());
        minify(&session, self.top_level_mode(), input, &mut output).map_err(|e| {
            OptimizeError::Compression(format!(
                "JS minification failed for {}: {:?}",
                task.relative_path.display(),
                e
            ))
        })?;
        Ok(output)
    }
}
