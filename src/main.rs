//! Epidash server binary
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! Loaded from `config.toml` (XDG config dir, `/etc/epidash/`, or the
//! working directory), with environment overrides:
//! - `EPIDASH_SOURCE_URL`: Source CSV URL
//! - `EPIDASH_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `EPIDASH_API_PORT`: Port to listen on (default: 8082)
//! - `EPIDASH_LOG_LEVEL` / `EPIDASH_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Log filter (default: epidash=info)

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use epidash::api::{serve, AppState};
use epidash::config::{generate_default_config, Config};
use epidash::dataset::{Dataset, DatasetCache};
use epidash::source::CsvSource;

#[derive(Parser)]
#[command(name = "epidash", version, about = "COVID-19 case dashboard backend")]
struct Cli {
    /// Path to a config file (overrides the default search locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the API server (default)
    Serve,
    /// Fetch and parse the source once, print a summary, and exit.
    /// Useful for smoke-testing the source without starting the server.
    Fetch,
    /// Print the default configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "epidash=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(config).await,
        Command::Fetch => run_fetch(config).await,
        Command::Config => {
            print!("{}", generate_default_config());
            Ok(())
        }
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Epidash API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Source URL: {}", config.source.url);

    let source = CsvSource::new(config.source.clone())?;
    let cache = Arc::new(DatasetCache::new(source));

    let state = AppState::new(cache, config.api.clone());

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Epidash server stopped");
    Ok(())
}

async fn run_fetch(config: Config) -> anyhow::Result<()> {
    let source = CsvSource::new(config.source.clone())?;

    let body = source.fetch().await?;
    let dataset = Dataset::from_csv(&body)?;

    let first_date = dataset.records.first().map(|r| r.date);
    let last_date = dataset.records.last().map(|r| r.date);

    println!("Fetched {}", source.url());
    println!("  countries: {}", dataset.countries.len());
    println!("  records:   {}", dataset.records.len());
    if let (Some(first), Some(last)) = (first_date, last_date) {
        println!("  range:     {} .. {}", first, last);
    }

    Ok(())
}
