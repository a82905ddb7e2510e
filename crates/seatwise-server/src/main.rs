//! Seatwise — reservation-booking HTTP service.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use seatwise_server::{routes, AppState};

fn resolve_data_dir() -> PathBuf {
    std::env::var("SEATWISE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    // Initialize configuration
    let config = seatwise_core::SeatwiseConfig::from_env(&data_dir)?;
    let port = config.port;

    // Open the reservation ledger
    let ledger = seatwise_ledger::Ledger::open(&config.ledger_path)
        .map_err(|e| anyhow::anyhow!("Failed to open ledger: {}", e))?;

    // Remote entity store client
    let store = seatwise_store::RestStore::new(&config.store);

    // Build application state
    let state = Arc::new(AppState::new(ledger, Arc::new(store)));

    // Build router
    let app = routes::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Seatwise server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
