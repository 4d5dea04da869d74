//! Orders API Service
//!
//! Entry point for the lead-capture endpoint: binds the HTTP server and
//! wires the ledger client and conversion reporter from the environment.

use anyhow::{Context, Result};
use orders_api::config::Config;
use orders_api::conversions::ConversionReporter;
use orders_api::sheets::SheetsClient;
use orders_api::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    info!("Starting Orders API Service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded");

    if config.google.is_none() {
        warn!("Google Sheets credentials not configured - order submissions will be rejected");
    }
    info!(
        "TikTok reporting: {}",
        if config.tiktok.is_some() { "enabled" } else { "disabled" }
    );
    info!(
        "Facebook reporting: {}",
        if config.facebook.is_some() { "enabled" } else { "disabled" }
    );

    // Create application state
    let sheets = config.google.clone().map(SheetsClient::new);
    let reporter = ConversionReporter::new(config.tiktok.clone(), config.facebook.clone());
    let state = AppState::new(sheets, reporter);

    // Create router
    let app = create_router(state);

    // Start server
    let listener = TcpListener::bind(&config.api_address())
        .await
        .with_context(|| format!("Failed to bind to {}", config.api_address()))?;

    info!("Orders API listening on {}", config.api_address());
    info!("Health check: http://{}/api/orders", config.api_address());

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
