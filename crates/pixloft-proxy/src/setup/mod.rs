//! Application setup and initialization.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use pixloft_core::Config;
use pixloft_store::StoreClient;

use crate::state::AppState;

/// Wire the application together: validated config, telemetry, the store
/// client, and the router.
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry();
    tracing::info!("Configuration loaded and validated successfully");

    let store =
        StoreClient::new(config.store().clone()).context("Failed to build store client")?;
    let state = Arc::new(AppState::new(config.clone(), store));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
