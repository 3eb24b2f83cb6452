//! # Output Mirror Module
//!
//! Questo modulo scrive l'output ottimizzato replicando la struttura
//! directory dell'input sotto una output root separata.
//!
//! ## Responsabilità:
//! - Creazione idempotente delle directory intermedie mancanti
//! - Scrittura con overwrite incondizionato (nessun merge/diff)
//! - Backup completo dell'albero di input sotto `outputRoot/backup/`
//!
//! ## Policy:
//! - Gli errori di mkdir/write (parent non-directory, permessi) vengono
//!   propagati senza retry; la pipeline decide come abortire
//! - Il backup è una deep copy verbatim, non incrementale, e deve
//!   completare prima che qualunque ottimizzazione inizi

use crate::error::OptimizeError;
use crate::walker::TreeWalker;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Directory name receiving the verbatim input copy when backup is enabled
pub const BACKUP_DIR: &str = "backup";

/// Writes content under an output root, preserving relative structure
pub struct OutputMirror {
    output_root: PathBuf,
}

impl OutputMirror {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Absolute destination path for a relative input path
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.output_root.join(relative)
    }

    /// Write content at the mirrored path, creating missing directories.
    ///
    /// Overwrites unconditionally; safe to call repeatedly for the same path.
    pub async fn write(&self, relative: &Path, content: &[u8]) -> Result<(), OptimizeError> {
        let destination = self.resolve(relative);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&destination, content).await?;
        debug!("Wrote {} bytes to {}", content.len(), destination.display());
        Ok(())
    }

    /// Copy every file under `input_root` verbatim into `outputRoot/backup/`.
    ///
    /// Returns the number of files copied. Any failure aborts immediately,
    /// before optimization starts.
    pub async fn backup_tree(&self, input_root: &Path) -> Result<usize, OptimizeError> {
        let walker = TreeWalker::new(input_root).skip_subtree(&self.output_root);
        let files = walker.enumerate_all()?;
        let backup_root = self.output_root.join(BACKUP_DIR);

        for relative in &files {
            let source = input_root.join(relative);
            let destination = backup_root.join(relative);
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::copy(&source, &destination).await?;
        }

        debug!(
            "Backed up {} files to {}",
            files.len(),
            backup_root.display()
        );
        Ok(files.len())
    }
}
