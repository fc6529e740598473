//! Blob store abstraction trait

use crate::BlobBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Blob store operation errors
#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid blob name: {0}")]
    InvalidName(String),

    #[error("Blob storage backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for blob store operations
pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

/// Blob store abstraction trait
///
/// Named binary objects inside a single container. Uploads overwrite any
/// existing blob of the same name unconditionally.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `data` under `blob_name`, tagging it with `content_type`.
    async fn upload(&self, blob_name: &str, content_type: &str, data: Bytes)
        -> BlobStoreResult<()>;

    /// Read a blob's bytes.
    async fn download(&self, blob_name: &str) -> BlobStoreResult<Bytes>;

    /// Content type recorded for a blob, if the backend keeps one.
    async fn content_type(&self, blob_name: &str) -> BlobStoreResult<Option<String>>;

    /// Check if a blob exists
    async fn exists(&self, blob_name: &str) -> BlobStoreResult<bool>;

    /// Delete a blob. Deleting a missing blob succeeds.
    async fn delete(&self, blob_name: &str) -> BlobStoreResult<()>;

    /// Names of every blob in the container.
    async fn list(&self) -> BlobStoreResult<Vec<String>>;

    /// Container the blobs live in.
    fn container(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> BlobBackend;
}
