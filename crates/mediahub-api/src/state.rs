//! Application state shared by all handlers.

use mediahub_core::{Config, MediaDefaults};
use mediahub_db::MetadataStore;
use mediahub_storage::BlobStore;
use std::sync::Arc;

/// Store clients are created once at startup and injected here.
pub struct AppState {
    pub config: Config,
    pub blob_store: Arc<dyn BlobStore>,
    pub metadata_store: Arc<dyn MetadataStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        blob_store: Arc<dyn BlobStore>,
        metadata_store: Arc<dyn MetadataStore>,
    ) -> Self {
        Self {
            config,
            blob_store,
            metadata_store,
        }
    }

    /// Fallback values for absent `userId` / `title`.
    pub fn defaults(&self) -> &MediaDefaults {
        self.config.defaults()
    }
}
