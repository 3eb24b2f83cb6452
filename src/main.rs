//! # Static Asset Optimizer - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Risoluzione della configurazione (file JSON + override dai flag)
//! - Dispatch dei subcommand: optimize (default), init, analyze
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (input, output, toggle per categoria, etc.)
//! 2. Carica l'eventuale config file e applica gli override espliciti
//! 3. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 4. Esegue il subcommand richiesto
//!
//! ## Esempio di utilizzo:
//! ```bash
//! asset-optimizer --input ./site --output ./dist --backup --verbose
//! asset-optimizer init
//! asset-optimizer analyze --input ./site --verbose
//! ```
//!
//! Exit code 0 in caso di successo, 1 per qualunque errore non gestito.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use static_asset_optimizer::config::CategoryToggle;
use static_asset_optimizer::{analyze_tree, AssetOptimizer, Config};

#[derive(Parser)]
#[command(name = "asset-optimizer")]
#[command(about = "Optimize HTML, CSS, JS and images into a mirrored output tree")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Optimization flags when no subcommand is given
    #[command(flatten)]
    optimize: OptimizeArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Optimize the input tree (default command)
    Optimize(OptimizeArgs),
    /// Write a default configuration file
    Init {
        /// Target path for the configuration document
        #[arg(default_value = "optimizer.config.json")]
        path: PathBuf,
    },
    /// Read-only report of file counts and sizes per category
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
struct OptimizeArgs {
    /// Directory containing the site sources
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for the mirrored optimized tree
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable HTML processing
    #[arg(long)]
    no_html: bool,

    /// Disable CSS processing
    #[arg(long)]
    no_css: bool,

    /// Disable JS processing
    #[arg(long)]
    no_js: bool,

    /// Disable image processing
    #[arg(long)]
    no_images: bool,

    /// Copy the input tree under outputDir/backup before optimizing
    #[arg(short, long)]
    backup: bool,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the resolved configuration and perform no writes
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Directory containing the site sources
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List every discovered file
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Init { path }) => {
            init_logging(false)?;
            Config::default().save_to_file(&path).await?;
            info!("Wrote default configuration to {}", path.display());
            Ok(())
        }
        Some(Command::Analyze(args)) => {
            let mut config = match &args.config {
                Some(path) => Config::from_file(path).await?,
                None => Config::default(),
            };
            if let Some(input) = args.input {
                config.input_dir = input;
            }
            let verbose = config.verbose || args.verbose;
            init_logging(verbose)?;
            validate_input_dir(&config)?;

            let report = analyze_tree(&config).await?;
            report.log(verbose);
            Ok(())
        }
        Some(Command::Optimize(args)) => run_optimize(args).await,
        None => run_optimize(cli.optimize).await,
    }
}

async fn run_optimize(args: OptimizeArgs) -> Result<()> {
    let config = resolve_config(&args).await?;
    init_logging(config.verbose)?;

    if args.dry_run {
        // Resolved configuration only, no writes of any kind
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    validate_input_dir(&config)?;

    let optimizer = AssetOptimizer::new(config)?;
    optimizer.run().await?;
    Ok(())
}

/// Config file values first, explicit flags override
async fn resolve_config(args: &OptimizeArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::default(),
    };

    if let Some(ref input) = args.input {
        config.input_dir = input.clone();
    }
    if let Some(ref output) = args.output {
        config.output_dir = output.clone();
    }
    if args.no_html {
        disable(&mut config.html);
    }
    if args.no_css {
        disable(&mut config.css);
    }
    if args.no_js {
        disable(&mut config.js);
    }
    if args.no_images {
        disable(&mut config.images);
    }
    if args.backup {
        config.backup = true;
    }
    if args.verbose {
        config.verbose = true;
    }

    Ok(config)
}

/// Turn a category off while keeping its compressor settings intact
fn disable(toggle: &mut CategoryToggle) {
    let mut settings = toggle.settings();
    settings.enabled = false;
    *toggle = CategoryToggle::Detailed(settings);
}

fn validate_input_dir(config: &Config) -> Result<()> {
    if !config.input_dir.is_dir() {
        return Err(anyhow::anyhow!(
            "Input directory does not exist: {}",
            config.input_dir.display()
        ));
    }
    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
