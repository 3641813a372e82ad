//! Startup orchestration.
//!
//! # Responsibilities
//! - Create the infractions table
//! - Bind the listener
//!
//! # Design Decisions
//! - Schema first, listener last (traffic only when ready)

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::RegistryConfig;
use crate::storage::{Gateway, StorageError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to initialize database {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: StorageError,
    },

    #[error("Schema initialization task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Initialize storage and bind the listener, in that order.
pub async fn prepare(config: &RegistryConfig) -> Result<(Gateway, TcpListener), StartupError> {
    let gateway = Gateway::from_config(&config.storage);

    let init = gateway.clone();
    tokio::task::spawn_blocking(move || init.initialize())
        .await?
        .map_err(|source| StartupError::Storage {
            path: gateway.path().display().to_string(),
            source,
        })?;

    tracing::info!(path = %gateway.path().display(), "Database ready");

    let listener = TcpListener::bind(&config.server.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.server.bind_address.clone(),
            source,
        })?;

    Ok((gateway, listener))
}
