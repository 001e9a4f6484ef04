mod boats;
mod cli;

use charter_core::{AppConfig, BoatQuery};
use charter_scanner::{lookup_with, Fetcher, LookupOrchestrator};
use chrono::{Datelike, Local};
use clap::Parser;
use cli::{boat_filter, Cli, Command};
use serde::Serialize;
use std::time::Duration;

/// Initialize tracing subscriber for logging
fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?.with_env()?,
        None => AppConfig::load_with_env()?,
    };
    if cli.debug {
        config.scanning.debug_logging = true;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.logging.filter);

    tracing::info!("Starting charter v{}", env!("CARGO_PKG_VERSION"));

    let today = || Local::now().date_naive();
    let debug_enabled = config.scanning.debug_logging;

    match cli.command {
        Command::Lookup { url, date } => {
            let date = date.unwrap_or_else(today);
            let fetcher = Fetcher::with_timeout(Duration::from_secs(
                config.scanning.request_timeout_secs,
            ))?;
            let query = BoatQuery::new(url, date.year(), date.month(), date.day())?;

            let result = lookup_with(&fetcher, &query, debug_enabled).await;
            print_json(&result)?;
        }
        Command::Status {
            boats,
            date,
            regions,
            ships,
        } => {
            let date = date.unwrap_or_else(today);
            let registry = boats::load_boats(&boats)?;
            let filter = boat_filter(regions, ships);
            let orchestrator = LookupOrchestrator::from_config(&config.scanning)?;

            let rows = orchestrator
                .query_all(&registry, &filter, date.year(), date.month(), date.day())
                .await;
            tracing::info!(boats = registry.len(), entries = rows.len(), "status complete");
            print_json(&rows)?;
        }
    }

    Ok(())
}
