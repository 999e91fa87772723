//! Blue Banner Engine API Server
//!
//! HTTP API server that merges Matchpoint predictions with actual results
//! from The Blue Alliance.

mod config;
mod routes;

use bbe_matchpoint::MatchpointClient;
use bbe_services::PredictionAggregator;
use bbe_tba::TbaClient;
use config::ServerConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<PredictionAggregator>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local, then .env
    for file in [".env.local", ".env"] {
        if let Err(e) = dotenvy::from_filename(file) {
            // Not an error if the file doesn't exist
            if !matches!(e, dotenvy::Error::Io(_)) {
                eprintln!("Warning: Failed to load {}: {}", file, e);
            }
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bbe_api=debug")),
        )
        .init();

    info!("Starting Blue Banner Engine API");

    let config = ServerConfig::from_env()?;

    if config.tba_api_key.is_some() {
        info!("TBA API key found in environment");
    } else {
        warn!("TBA_API_KEY not set - real match data will not be available");
    }

    // The channel is opened once here and shared read-only by every request
    let matchpoint = MatchpointClient::connect_lazy(&config.grpc_address, config.prediction_timeout)?;
    info!("Matchpoint client targeting {}", matchpoint.address());

    let tba = TbaClient::with_config(
        &config.tba_base_url,
        config.tba_api_key.clone(),
        config.results_timeout,
    )?;

    let aggregator = PredictionAggregator::new(Arc::new(matchpoint), Arc::new(tba));

    let state = AppState {
        aggregator: Arc::new(aggregator),
    };

    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
