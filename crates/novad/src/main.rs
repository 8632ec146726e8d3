//! Nova Daemon - multi-provider chat backend.
//!
//! Routes each chat request across the configured completion backends
//! in priority order and serves the result over HTTP.

use anyhow::Result;
use nova_common::NovaConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Nova Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = NovaConfig::load();
    novad::server::run(config).await
}
