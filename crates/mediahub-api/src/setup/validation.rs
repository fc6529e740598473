//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use mediahub_core::{BlobBackend, Config, MetadataBackend};

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() {
        if config.blob_backend() == BlobBackend::Memory {
            tracing::warn!("In-memory blob store in production - uploaded files are lost on restart");
        }
        if config.metadata_backend() == MetadataBackend::Memory {
            tracing::warn!("In-memory metadata store in production - records are lost on restart");
        }
    }

    let defaults = config.defaults();
    if defaults.user_id.is_empty() {
        return Err(anyhow::anyhow!("DEFAULT_USER_ID cannot be empty"));
    }

    tracing::info!(
        default_user_id = %defaults.user_id,
        default_title = %defaults.title,
        "Requests without userId/title fall back to defaults"
    );

    Ok(())
}
