//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use mediahub_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    mediahub_infra::init_telemetry(config.service_name(), config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let (blob_store, metadata_store) = storage::setup_stores(&config).await?;

    let state = Arc::new(AppState::new(config.clone(), blob_store, metadata_store));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
