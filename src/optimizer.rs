//! # Main Optimizer Orchestrator Module
//!
//! Questo è il modulo principale che orchestra tutto il processo di
//! ottimizzazione.
//!
//! ## Responsabilità:
//! - Coordinamento di tutti gli altri moduli
//! - Orchestrazione del flusso: backup → discovery → transform → mirror
//! - Accumulo statistiche e report finale
//!
//! ## Flusso di esecuzione:
//! 1. **Backup** (opzionale): copia verbatim dell'input sotto
//!    `outputDir/backup/`, completata prima di qualunque ottimizzazione
//! 2. **Per categoria** (ordine fisso HTML → CSS → JS → immagini):
//!    enumerazione, poi per ogni file in ordine di enumerazione:
//!    read → transform → mirror write → record stats
//! 3. **Reporting**: conteggio per categoria e report finale aggregato
//!
//! ## Error handling:
//! - Fail-fast rigoroso: il primo errore di read/transform/write abortisce
//!   l'intera invocazione; i file già scritti restano al loro posto
//! - Unica eccezione deliberata: gli output derivati (WebP) sono
//!   best-effort, loggati come warning e saltati in caso di errore
//!
//! ## Modello di esecuzione:
//! Single-threaded, sequenziale: nessun file viene processato in parallelo
//! e le categorie si susseguono una dopo l'altra. Lo `RunStats` è locale
//! alla run, creato all'inizio e scartato dopo il report.
//!
//! ## Esempio:
//! ```no_run
//! use static_asset_optimizer::{AssetOptimizer, Config};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let optimizer = AssetOptimizer::new(Config::default())?;
//! let stats = optimizer.run().await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    adapters::AdapterSet,
    category::AssetCategory,
    config::Config,
    error::OptimizeError,
    mirror::OutputMirror,
    progress::ProgressManager,
    stats::{format_size, reduction_percent, RunStats},
    walker::TreeWalker,
};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Main asset optimizer orchestrator
pub struct AssetOptimizer {
    config: Config,
    adapters: AdapterSet,
    mirror: OutputMirror,
}

impl AssetOptimizer {
    /// Create a new optimizer with the production adapters
    pub fn new(config: Config) -> Result<Self, OptimizeError> {
        let adapters = AdapterSet::from_config(&config);
        Self::with_adapters(config, adapters)
    }

    /// Create an optimizer with caller-supplied adapters
    pub fn with_adapters(config: Config, adapters: AdapterSet) -> Result<Self, OptimizeError> {
        config.validate()?;
        let mirror = OutputMirror::new(&config.output_dir);
        Ok(Self {
            config,
            adapters,
            mirror,
        })
    }

    /// Run the optimization process
    pub async fn run(&self) -> Result<RunStats> {
        info!(
            "Starting asset optimization in: {}",
            self.config.input_dir.display()
        );
        info!("📁 Output directory: {}", self.config.output_dir.display());

        let enabled: Vec<&str> = AssetCategory::ALL
            .into_iter()
            .filter(|category| self.config.category_enabled(*category))
            .map(AssetCategory::label)
            .collect();
        info!("🎯 Categories: {}", enabled.join(", "));

        // Backup must complete before any optimization starts
        if self.config.backup {
            info!("🗄  Backing up input tree before optimizing");
            let copied = self
                .mirror
                .backup_tree(&self.config.input_dir)
                .await
                .context("Backup failed, aborting before optimization")?;
            info!("🗄  Backup complete: {} files", copied);
        }

        let mut stats = RunStats::new();

        for category in AssetCategory::ALL {
            if !self.config.category_enabled(category) {
                debug!("Skipping disabled category: {}", category);
                continue;
            }
            self.process_category(category, &mut stats).await?;
        }

        self.print_final_stats(&stats);
        Ok(stats)
    }

    async fn process_category(
        &self,
        category: AssetCategory,
        stats: &mut RunStats,
    ) -> Result<()> {
        let walker =
            TreeWalker::new(&self.config.input_dir).skip_subtree(&self.config.output_dir);
        let tasks = walker.enumerate(category)?;
        info!("Found {} {} files to process", tasks.len(), category);

        if tasks.is_empty() {
            return Ok(());
        }

        let adapter = self.adapters.get(category);
        let progress = ProgressManager::new(tasks.len() as u64);
        let mut written = 0usize;

        for task in &tasks {
            let source = self.config.input_dir.join(&task.relative_path);
            let content = tokio::fs::read(&source)
                .await
                .with_context(|| format!("Failed to read {}", source.display()))?;
            let original_size = content.len() as u64;

            // Fail-fast: a single bad file stops the whole invocation
            let optimized = adapter.transform(task, &content).with_context(|| {
                format!(
                    "{} compression failed for {}",
                    category,
                    task.relative_path.display()
                )
            })?;

            self.mirror
                .write(&task.relative_path, &optimized)
                .await
                .with_context(|| {
                    format!("Failed to write {}", task.relative_path.display())
                })?;

            stats.record(original_size, optimized.len() as u64);
            written += 1;
            progress.update(&format!(
                "✅ {}: {:.1}% saved",
                task.relative_path.display(),
                reduction_percent(original_size, optimized.len() as u64)
            ));

            // Derived outputs are best-effort: log and move on
            if let Some((relative, result)) = adapter.derivative(task, &content) {
                match result {
                    Ok(bytes) => {
                        if let Err(e) = self.mirror.write(&relative, &bytes).await {
                            warn!("⚠️  Skipping derived output {}: {}", relative.display(), e);
                        } else {
                            debug!("Derived output written: {}", relative.display());
                        }
                    }
                    Err(e) => {
                        warn!("⚠️  Skipping derived output {}: {}", relative.display(), e);
                    }
                }
            }
        }

        progress.finish(&format!("{}: {} files optimized", category, written));
        info!("{}: {} files optimized", category, written);
        Ok(())
    }

    fn print_final_stats(&self, stats: &RunStats) {
        let savings = stats.savings();
        info!("=== Optimization Complete ===");
        info!("Files processed: {}", stats.files_processed);
        info!("Original size: {}", format_size(stats.original_bytes));
        info!("Optimized size: {}", format_size(stats.optimized_bytes));
        info!(
            "Saved: {} bytes ({:.2}%)",
            savings.saved_bytes, savings.saved_percentage
        );
        info!("Elapsed: {} ms", stats.elapsed_millis());
    }
}
