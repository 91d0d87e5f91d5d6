// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sunlead serve` command implementation.
//!
//! Starts the HTTP gateway backed by SQLite storage: chat and quote
//! sessions, the public catalog, and the token-gated admin API.
//! Supports graceful shutdown via Ctrl-C.

use std::sync::Arc;

use sunlead_config::SunleadConfig;
use sunlead_core::error::SunleadError;
use sunlead_core::{CatalogStore, LeadStore, StoreAdapter};
use sunlead_gateway::{start_server, GatewayState, ServerConfig};
use sunlead_storage::SqliteStorage;
use tracing::info;

/// Runs the `sunlead serve` command.
///
/// Initializes storage, builds the shared gateway state, and serves HTTP
/// until a shutdown signal arrives. The database is checkpointed and
/// closed on the way out.
pub async fn run_serve(config: SunleadConfig) -> Result<(), SunleadError> {
    // Initialize tracing subscriber.
    init_tracing(&config.site.log_level);

    info!("starting sunlead serve");

    // Initialize storage.
    let storage = {
        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        Arc::new(storage)
    };

    let leads: Arc<dyn LeadStore + Send + Sync> = storage.clone();
    let catalog: Arc<dyn CatalogStore + Send + Sync> = storage.clone();

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    let state = GatewayState::new(leads, catalog, &config);

    if config.gateway.admin_token.is_none() {
        info!("no admin token configured; admin endpoints will refuse all requests");
    }

    let result = tokio::select! {
        served = start_server(&server_config, state) => served,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            Ok(())
        }
    };

    storage.shutdown().await?;
    info!("sunlead serve shutdown complete");
    result
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sunlead={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
