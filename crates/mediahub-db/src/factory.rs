use crate::{
    CosmosMetadataStore, InMemoryMetadataStore, MetadataBackend, MetadataStore,
    MetadataStoreError, MetadataStoreResult,
};
use mediahub_core::constants::{METADATA_CONTAINER_NAME, METADATA_DATABASE_NAME};
use mediahub_core::Config;
use std::sync::Arc;

/// Create a metadata store based on configuration.
///
/// The Cosmos backend provisions its database and container on first use.
pub async fn create_metadata_store(config: &Config) -> MetadataStoreResult<Arc<dyn MetadataStore>> {
    match config.metadata_backend() {
        MetadataBackend::Cosmos => {
            let endpoint = config.cosmos_endpoint().ok_or_else(|| {
                MetadataStoreError::Config("COSMOS_ENDPOINT not configured".to_string())
            })?;
            let key = config.cosmos_key().ok_or_else(|| {
                MetadataStoreError::Config("COSMOS_KEY not configured".to_string())
            })?;

            let store = CosmosMetadataStore::new(
                endpoint,
                key,
                METADATA_DATABASE_NAME,
                METADATA_CONTAINER_NAME,
            )?;
            store.ensure_container().await?;

            tracing::info!(
                database = METADATA_DATABASE_NAME,
                container = METADATA_CONTAINER_NAME,
                "Cosmos metadata store ready"
            );
            Ok(Arc::new(store))
        }

        MetadataBackend::Memory => {
            tracing::warn!("Using in-memory metadata store; records are lost on restart");
            Ok(Arc::new(InMemoryMetadataStore::new()))
        }
    }
}
