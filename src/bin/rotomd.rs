//! rotomd — Rotom daemon.
//!
//! Serves the team API over HTTP, enriching team reads through the TTL
//! cache in front of PokeAPI.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rotom::server::config::Config;
use rotom::server::{AppState, router};
use rotom::{EnrichmentCache, PokeApiClient, TeamEnricher, TeamStore};

/// Rotom daemon — Pokémon team service.
#[derive(Parser)]
#[command(name = "rotomd")]
#[command(version = rotom::PKG_VERSION)]
#[command(about = "Pokémon team service daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Address to bind, overriding the config file.
    #[arg(short, long, env = "ROTOM_ADDRESS")]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(args.config.as_deref())?;

    // Parse address
    let address = args.address.unwrap_or_else(|| config.server.address.clone());
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| rotom::RotomError::Configuration(format!("Invalid address: {e}")))?;

    // Wire the store, cache, and enricher
    let store = Arc::new(TeamStore::open(&config.storage.path)?);
    let client = PokeApiClient::with_timeout(
        config.upstream.base_url.clone(),
        Duration::from_secs(config.upstream.timeout_secs),
    );
    let cache = Arc::new(EnrichmentCache::new(
        &config.cache.to_cache_config(),
        Arc::new(client),
    ));
    let enricher = Arc::new(TeamEnricher::new(cache));

    let app = router(AppState { store, enricher }, &config.server.limits);

    info!(version = rotom::version_string(), %addr, "rotomd starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
