//! Purser API Server
//!
//! Main entry point for the purchase conversion service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use purser_api::{AppState, create_router};
use purser_core::purchase::PurchaseService;
use purser_db::{PurchaseRepository, connect_with};
use purser_shared::AppConfig;
use purser_treasury::{TreasuryClient, TreasuryConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "purser=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Connect to database
    let db = connect_with(&config.database)
        .await
        .context("failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    // Create exchange-rate client
    let treasury = TreasuryClient::new(TreasuryConfig::from(&config.exchange_rate))
        .context("failed to build exchange rate client")?;
    info!(
        base_url = %treasury.config().base_url,
        retry_budget_secs = config.exchange_rate.max_elapsed_secs,
        "Exchange rate client configured"
    );

    // Create application state
    let service = PurchaseService::new(Arc::new(PurchaseRepository::new(db)), Arc::new(treasury));
    let app = create_router(AppState::new(service));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C; in-flight requests are drained and their lookups cancelled.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
