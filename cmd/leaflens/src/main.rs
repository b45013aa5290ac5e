use anyhow::Result;
use clap::{Parser, Subcommand};
use leaflens_core::{Config, FileStore, LeafLens};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod commands;
mod providers;
mod utils;

use commands::*;

#[derive(Parser)]
#[command(
    name = "leaflens",
    version,
    about = "Plant search, identification and care guides",
    long_about = "Look up plants by name or photo and get a merged care record\n\n\
                  Examples:\n  \
                  leaflens search monstera\n  \
                  leaflens details \"Monstera deliciosa\"\n  \
                  leaflens identify leaf.jpg\n  \
                  leaflens discover --category growth\n\n\
                  For more help: leaflens help",
    after_help = "Use 'leaflens <command> --help' for more information about a command."
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    output: OutputFormat,

    /// Directory holding the plant cache and search history
    #[arg(long, global = true, env = "LEAFLENS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log format written to stderr
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
    Compact,
}

#[derive(Clone, clap::ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Search plants by name
    ///
    /// Examples:
    ///   leaflens search rose
    ///   leaflens search snake plant --output json
    Search {
        /// Free-text query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show the merged care record for a scientific name
    Details {
        /// Scientific name, e.g. "Aloe vera"
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Identify a plant from a photo
    Identify {
        /// Path to a JPEG or PNG image
        image: PathBuf,

        /// List every ranked candidate instead of enriching the top one
        #[arg(long)]
        all: bool,
    },

    /// Show or clear recent searches
    #[command(subcommand)]
    History(HistoryCommands),

    /// Show the featured plant collection
    Featured,

    /// Browse plant facts
    Discover {
        /// All, Growth, Behavior, History, Carnivorous, Environment or Research
        #[arg(long, default_value = "All")]
        category: String,
    },

    /// Manage the plant cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

fn init_tracing(format: &LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "leaflens=info,leaflens_core=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(&cli.log_format);

    let mut config = Config::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let config = config.validate()?;

    let missing = config.missing_keys();
    if !missing.is_empty() {
        tracing::warn!(providers = ?missing, "No API key configured; requests to these providers will fail");
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "Using data directory");

    let store = Arc::new(FileStore::new(&config.data_dir));
    let providers = providers::from_config(&config)?;
    let app = LeafLens::new(config, store, providers);

    tokio::select! {
        result = run(&app, cli.command, &cli.output) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted");
            Ok(())
        }
    }
}

async fn run(app: &LeafLens, command: Commands, output: &OutputFormat) -> Result<()> {
    match command {
        Commands::Search { query } => search::handle(app, query.join(" "), output).await,
        Commands::Details { name } => details::handle(app, name.join(" "), output).await,
        Commands::Identify { image, all } => identify::handle(app, image, all, output).await,
        Commands::History(cmd) => history::handle(app, cmd, output).await,
        Commands::Featured => featured::handle(app, output).await,
        Commands::Discover { category } => discover::handle(app, category, output).await,
        Commands::Cache(cmd) => cache::handle(app, cmd, output).await,
    }
}
