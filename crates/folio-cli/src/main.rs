use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::AppConfig;

mod commands;
mod trace;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Gesture-driven page navigation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ~/.config/folio/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List pages in navigation order
    Catalog,
    /// Print the effective configuration as TOML
    Config {
        /// Print built-in defaults instead
        #[arg(long)]
        default: bool,
        /// Write built-in defaults to ~/.config/folio/config.toml
        #[arg(long, conflicts_with = "default")]
        init: bool,
    },
    /// Replay a trace file on virtual time
    Replay {
        /// Trace file (JSON)
        trace: PathBuf,
        /// Print one JSON snapshot per step
        #[arg(long)]
        json: bool,
    },
    /// Run JSON-lines commands from stdin in real time
    Live {
        /// Trace file whose surface and carousels to use (steps are ignored)
        #[arg(short = 's', long)]
        surface: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);

    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Catalog => commands::catalog::run(&config),
        Commands::Config { default: _, init: true } => commands::config::init(),
        Commands::Config { default, init: false } => {
            commands::config::run(&config, &config_path, default)
        }
        Commands::Replay { trace, json } => commands::replay::run(&config, &trace, json),
        Commands::Live { surface } => commands::live::run(&config, surface.as_deref()).await,
    }
}
