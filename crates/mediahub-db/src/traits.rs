//! Metadata store abstraction trait

use crate::MetadataBackend;
use async_trait::async_trait;
use mediahub_core::MediaMetadata;
use thiserror::Error;

/// Metadata store operation errors
#[derive(Debug, Error)]
pub enum MetadataStoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Metadata store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Metadata store error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for metadata store operations
pub type MetadataStoreResult<T> = Result<T, MetadataStoreError>;

/// Metadata store abstraction trait
///
/// Point operations address a record by `(id, partition_key)`. A record read
/// with the wrong partition key is not found.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert a new record. Fails with `Conflict` if the id already exists in
    /// the record's partition.
    async fn create(&self, item: &MediaMetadata) -> MetadataStoreResult<MediaMetadata>;

    /// Read one record.
    async fn read(&self, id: &str, partition_key: &str) -> MetadataStoreResult<MediaMetadata>;

    /// Insert or replace a record by id within its partition.
    async fn upsert(&self, item: &MediaMetadata) -> MetadataStoreResult<MediaMetadata>;

    /// Every record across all partitions, fully drained. No ordering guarantee.
    async fn read_all(&self) -> MetadataStoreResult<Vec<MediaMetadata>>;

    /// Delete one record.
    async fn delete(&self, id: &str, partition_key: &str) -> MetadataStoreResult<()>;

    /// Cheap connectivity check used by readiness probes.
    async fn ping(&self) -> MetadataStoreResult<()>;

    /// Get the metadata backend type
    fn backend_type(&self) -> MetadataBackend;
}
