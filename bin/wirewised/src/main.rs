//! ---
//! ww_section: "06-service-binaries"
//! ww_subsection: "binary"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Binary entrypoint for the WireWise daemon."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use wirewise_api::{spawn_api_server, ApiState};
use wirewise_catalog::{load_catalog_from_file, InMemoryCatalog};
use wirewise_common::config::AppConfig;
use wirewise_common::logging::init_tracing;
use wirewise_common::{new_registry, ServiceMetrics};
use wirewise_market::{new_shared_quote, spawn_refresh, MarketFeed};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "WireWise daemon",
    long_about = None
)]
struct Cli {
    #[arg(long, value_name = "FILE", help = "Path to configuration file")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Catalog file overriding the built-in tables")]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut candidates = Vec::new();
    if let Some(path) = &cli.config {
        candidates.push(path.clone());
    }
    candidates.push(PathBuf::from("configs/wirewise.toml"));
    candidates.push(PathBuf::from("configs/wirewise.dev.toml"));

    let loaded = AppConfig::load_with_source(&candidates)?;
    let mut config = loaded.config;
    if let Some(path) = cli.catalog {
        config.catalog.path = Some(path);
    }

    init_tracing("wirewised", &config.logging)?;
    match &loaded.source {
        Some(path) => info!(config_path = %path.display(), "configuration loaded"),
        None => info!("no configuration file found, running on defaults"),
    }

    let catalog = match &config.catalog.path {
        Some(path) => load_catalog_from_file(path)?,
        None => InMemoryCatalog::seeded(),
    };
    let catalog_rows = catalog.len();
    info!(catalog_rows, "conductor catalog ready");

    let registry = new_registry();
    let metrics = ServiceMetrics::new(registry)?;

    let market = Arc::new(MarketFeed::new(config.market.clone()));
    let quote_cache = new_shared_quote();
    let refresh_job = if config.market.enabled {
        Some(spawn_refresh(
            market.clone(),
            quote_cache.clone(),
            config.market.refresh_interval,
            config.metrics.enabled.then(|| metrics.clone()),
        ))
    } else {
        info!("market refresh disabled by configuration");
        None
    };

    let server = if config.api.enabled {
        let state = Arc::new(
            ApiState::new(Arc::new(catalog), catalog_rows, market, quote_cache, metrics)
                .with_metrics_enabled(config.metrics.enabled),
        );
        let server = spawn_api_server(state, config.api.listen).await?;
        info!(address = %server.addr(), "wirewised is up");
        Some(server)
    } else {
        info!("api listener disabled by configuration");
        None
    };

    signal::ctrl_c().await?;
    info!("shutdown signal received");

    if let Some(job) = refresh_job {
        if let Err(err) = job.shutdown().await {
            warn!(error = %err, "market refresh job did not stop cleanly");
        }
    }
    if let Some(server) = server {
        server.shutdown().await?;
    }
    info!("wirewised stopped");
    Ok(())
}
