//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Connection settings for the remote entity store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the hosted store (e.g. `https://xyz.supabase.co`).
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
}

/// Top-level Seatwise configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatwiseConfig {
    /// HTTP server port.
    pub port: u16,
    /// Path to the reservation ledger file (`data/reservations.csv`).
    pub ledger_path: PathBuf,
    /// Remote entity store connection settings.
    pub store: StoreConfig,
}

impl SeatwiseConfig {
    /// Create configuration from environment and defaults.
    ///
    /// `SEATWISE_STORE_URL` and `SEATWISE_STORE_KEY` are required; `PORT`
    /// defaults to 3003. Creates the data directory if needed.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3003);

        let base_url = std::env::var("SEATWISE_STORE_URL")
            .map_err(|_| Error::Config("SEATWISE_STORE_URL is not set".into()))?;
        let api_key = std::env::var("SEATWISE_STORE_KEY")
            .map_err(|_| Error::Config("SEATWISE_STORE_KEY is not set".into()))?;

        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;

        Ok(Self {
            port,
            ledger_path: data_dir.join("reservations.csv"),
            store: StoreConfig { base_url, api_key },
        })
    }
}
