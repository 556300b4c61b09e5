//! Wastemap Dashboard Server
//!
//! Run with: cargo run -- --gdp GDP_Data.csv --waste Waste_Data.csv
//!
//! # Configuration
//!
//! Settings are read from a TOML file (`--config`, or the first of
//! `~/.config/wastemap/config.toml`, `/etc/wastemap/config.toml`,
//! `./config.toml`), then environment variables, then command-line flags.
//! A config file that exists but fails to parse or validate aborts startup.
//!
//! Environment variables:
//! - `WASTEMAP_GDP_PATH`, `WASTEMAP_WASTE_PATH`: input tables
//! - `WASTEMAP_HOST`, `WASTEMAP_PORT`: bind address (default: 127.0.0.1:8050)
//! - `WASTEMAP_LOG_LEVEL`, `WASTEMAP_LOG_FORMAT`: logging
//! - `RUST_LOG`: Log filter (takes precedence over the configured level)

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wastemap::api::{serve, AppState};
use wastemap::config::{generate_default_config, Config, ConfigSource, LoggingConfig};
use wastemap::dashboard::Dashboard;
use wastemap::data::Datasets;

#[derive(Parser)]
#[command(name = "wastemap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dashboard contrasting global GDP and municipal waste per capita")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// GDP table (CSV)
    #[arg(long, global = true)]
    gdp: Option<PathBuf>,

    /// Municipal waste table (CSV)
    #[arg(long, global = true)]
    waste: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the tables and serve the dashboard (default)
    Serve,

    /// Print a default configuration file
    PrintConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::PrintConfig) = cli.command {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let (mut config, source) = match &cli.config {
        Some(path) => {
            let config = Config::load_with_env(path)
                .with_context(|| format!("loading config from {:?}", path))?;
            (config, ConfigSource::File(path.clone()))
        }
        None => Config::load_default().context("loading default config")?,
    };
    apply_cli_overrides(&mut config, &cli);
    config
        .validate()
        .context("validating config after command-line overrides")?;

    init_tracing(&config.logging);

    tracing::info!("Starting Wastemap v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(%source, "Configuration loaded");
    tracing::info!("GDP table: {:?}", config.data.gdp_path);
    tracing::info!("Waste table: {:?}", config.data.waste_path);

    let datasets = Datasets::load(
        &config.data.gdp_path,
        config.data.gdp_filter.clone(),
        &config.data.waste_path,
        config.data.waste_filter.clone(),
        &config.data.columns,
    )
    .context("loading indicator tables")?;

    if datasets.gdp.is_empty() || datasets.waste.is_empty() {
        tracing::warn!(
            gdp_rows = datasets.gdp.len(),
            waste_rows = datasets.waste.len(),
            "A table is empty after filtering; charts will render without data"
        );
    }

    let dashboard = Dashboard::new(Arc::new(datasets), config.dashboard.clone());
    let state = AppState::new(dashboard, config.api.clone());

    serve(state).await?;

    tracing::info!("Wastemap stopped");
    Ok(())
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(gdp) = &cli.gdp {
        config.data.gdp_path = gdp.clone();
    }
    if let Some(waste) = &cli.waste {
        config.data.waste_path = waste.clone();
    }
    if let Some(host) = &cli.host {
        config.api.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("wastemap={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
