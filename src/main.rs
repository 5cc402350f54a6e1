//! # Marketplace
//!
//! Boots the order system and serves the HTTP API until Ctrl-C.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! MARKET_ORDER_EXPIRY_SECS=600 RUST_LOG=debug cargo run
//! ```

use actor_framework::tracing::setup_tracing;
use marketplace::api::{self, AppState};
use marketplace::clock::SystemClock;
use marketplace::config::Config;
use marketplace::lifecycle::OrderSystem;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Config::from_env()?;
    info!(?config, "Starting marketplace");

    let mut system = OrderSystem::new(&config, Arc::new(SystemClock));
    system.start_sweeper();

    let app = api::router(AppState::from(&system));
    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!(addr = %config.http_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
    }
    info!("Shutdown signal received");
}
