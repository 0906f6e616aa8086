//! # Provider Locator
//!
//! HTTP service that picks a storage provider for a piece size, preferring
//! the provider geographically nearest to the caller.

use anyhow::{Context, Result};
use clap::Parser;
use sp_runtime::{build_gateway, init_logging, LocatorConfig};
use std::path::PathBuf;
use tracing::{info, warn};

/// Storage provider locator
#[derive(Parser, Debug)]
#[command(name = "provider-locator", version)]
#[command(about = "Locate the nearest storage provider accepting a piece size")]
struct Args {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config =
        LocatorConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    init_logging(&config.logging).context("failed to initialize logging")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        addr = %config.http.http_addr(),
        "Starting provider locator"
    );

    let gateway = build_gateway(&config)?;
    gateway
        .start(shutdown_signal())
        .await
        .context("API gateway stopped with an error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => warn!(error = %e, "cannot listen for Ctrl+C, shutting down"),
    }
}
