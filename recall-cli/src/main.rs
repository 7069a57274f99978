//! recall CLI — the terminal trainer and round history.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recall_core::{Difficulty, RecallConfig};

mod commands;
mod interrupt;
mod session;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "recall.toml";

#[derive(Parser)]
#[command(name = "recall", version, about = "Short-term memory trainer: digits and words")]
struct Cli {
    /// Config file path (defaults to ./recall.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database path, overriding `persistence.db_path`
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play training rounds
    Play {
        /// Difficulty preset: 1-4 or easy, medium, hard, very-hard
        #[arg(long)]
        level: Option<Difficulty>,

        /// Seed for reproducible sequences
        #[arg(long)]
        seed: Option<u64>,

        /// Do not store rounds
        #[arg(long)]
        no_save: bool,
    },

    /// Show recently played rounds
    History {
        /// Number of rounds to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show the newest game event log entries
    Logs {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Create or initialize the database
    InitDb,
}

fn load_config(path: Option<&Path>, db: Option<PathBuf>) -> Result<RecallConfig> {
    let mut config = match path {
        Some(p) => RecallConfig::from_file(p).with_context(|| format!("loading {}", p.display()))?,
        None if Path::new(DEFAULT_CONFIG).exists() => {
            RecallConfig::from_file(Path::new(DEFAULT_CONFIG)).context("loading recall.toml")?
        }
        None => RecallConfig::default(),
    };
    if let Some(db) = db {
        config.persistence.db_path = db;
    }
    Ok(config)
}

fn init_tracing(log_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("recall={log_level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref(), cli.db)?;
    init_tracing(&config.general.log_level)?;

    match cli.command {
        Commands::Play {
            level,
            seed,
            no_save,
        } => commands::play::execute(&config, level, seed, no_save),
        Commands::History { limit } => commands::history::execute(&config, limit),
        Commands::Logs { limit } => commands::logs::execute(&config, limit),
        Commands::InitDb => commands::init_db::execute(&config),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
