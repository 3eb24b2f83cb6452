//! # Static Asset Optimizer Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API
//! pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione, merge sui default e validazione
//! - `error`: Tipi di errore custom per diverse operazioni
//! - `category`: Classificazione dei file per estensione
//! - `walker`: Discovery ricorsiva dei file sotto la input root
//! - `mirror`: Scrittura output con struttura directory replicata + backup
//! - `adapters`: Contratto black-box verso i minifier esterni
//! - `stats`: Statistiche aggregate e savings report
//! - `optimizer`: Orchestratore principale del processo
//! - `analyze`: Ispezione read-only dell'albero di input
//! - `progress`: Progress tracking visuale
//!
//! ## Utilizzo:
//! ```no_run
//! use static_asset_optimizer::{AssetOptimizer, Config};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let optimizer = AssetOptimizer::new(Config::default())?;
//! let stats = optimizer.run().await?;
//! println!("{}", stats.format_summary());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod analyze;
pub mod category;
pub mod config;
pub mod error;
pub mod mirror;
pub mod optimizer;
pub mod progress;
pub mod stats;
pub mod walker;

pub use adapters::{AdapterSet, CompressionAdapter};
pub use analyze::{analyze_tree, AnalysisReport};
pub use category::AssetCategory;
pub use config::Config;
pub use error::OptimizeError;
pub use optimizer::AssetOptimizer;
pub use stats::{RunStats, Savings};
pub use walker::{FileTask, TreeWalker};
