//! Store client setup

use anyhow::{Context, Result};
use mediahub_core::Config;
use mediahub_db::{create_metadata_store, MetadataStore};
use mediahub_storage::{create_blob_store, BlobStore};
use std::sync::Arc;

/// Build both store clients once; they are shared by every request.
pub async fn setup_stores(
    config: &Config,
) -> Result<(Arc<dyn BlobStore>, Arc<dyn MetadataStore>)> {
    tracing::info!("Initializing blob store...");
    let blob_store = create_blob_store(config)
        .await
        .context("Failed to initialize blob store")?;
    tracing::info!(
        backend = %blob_store.backend_type(),
        container = %blob_store.container(),
        "Blob store initialized"
    );

    tracing::info!("Initializing metadata store...");
    let metadata_store = create_metadata_store(config)
        .await
        .context("Failed to initialize metadata store")?;
    tracing::info!(
        backend = %metadata_store.backend_type(),
        "Metadata store initialized"
    );

    Ok((blob_store, metadata_store))
}
