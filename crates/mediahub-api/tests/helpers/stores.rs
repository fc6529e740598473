//! Store doubles for failure and interleaving scenarios.

use async_trait::async_trait;
use bytes::Bytes;
use mediahub_core::{BlobBackend, MediaMetadata, MetadataBackend};
use mediahub_db::{InMemoryMetadataStore, MetadataStore, MetadataStoreError, MetadataStoreResult};
use mediahub_storage::{BlobStore, BlobStoreError, BlobStoreResult};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

/// Blob store whose every call fails.
pub struct UnavailableBlobStore;

#[async_trait]
impl BlobStore for UnavailableBlobStore {
    async fn upload(&self, _: &str, _: &str, _: Bytes) -> BlobStoreResult<()> {
        Err(BlobStoreError::UploadFailed("account is disabled".to_string()))
    }

    async fn download(&self, name: &str) -> BlobStoreResult<Bytes> {
        Err(BlobStoreError::NotFound(name.to_string()))
    }

    async fn content_type(&self, _: &str) -> BlobStoreResult<Option<String>> {
        Err(BlobStoreError::Backend("account is disabled".to_string()))
    }

    async fn exists(&self, _: &str) -> BlobStoreResult<bool> {
        Err(BlobStoreError::Backend("account is disabled".to_string()))
    }

    async fn delete(&self, _: &str) -> BlobStoreResult<()> {
        Err(BlobStoreError::Backend("account is disabled".to_string()))
    }

    async fn list(&self) -> BlobStoreResult<Vec<String>> {
        Err(BlobStoreError::Backend("account is disabled".to_string()))
    }

    fn container(&self) -> &str {
        "mediafiles"
    }

    fn backend_type(&self) -> BlobBackend {
        BlobBackend::Memory
    }
}

/// Metadata store that rejects writes but serves reads from an empty store.
#[derive(Default)]
pub struct ReadOnlyMetadataStore {
    inner: InMemoryMetadataStore,
}

fn throttled() -> MetadataStoreError {
    MetadataStoreError::Backend("429 Too Many Requests: Request rate is large".to_string())
}

#[async_trait]
impl MetadataStore for ReadOnlyMetadataStore {
    async fn create(&self, _: &MediaMetadata) -> MetadataStoreResult<MediaMetadata> {
        Err(throttled())
    }

    async fn read(&self, id: &str, partition_key: &str) -> MetadataStoreResult<MediaMetadata> {
        self.inner.read(id, partition_key).await
    }

    async fn upsert(&self, _: &MediaMetadata) -> MetadataStoreResult<MediaMetadata> {
        Err(throttled())
    }

    async fn read_all(&self) -> MetadataStoreResult<Vec<MediaMetadata>> {
        self.inner.read_all().await
    }

    async fn delete(&self, _: &str, _: &str) -> MetadataStoreResult<()> {
        Err(throttled())
    }

    async fn ping(&self) -> MetadataStoreResult<()> {
        Err(throttled())
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Memory
    }
}

/// Holds every point read at a barrier until `parties` reads have happened,
/// so concurrent updates all read the same version before any writes. Upserts
/// are recorded in the order they reach the store.
pub struct InterleavingMetadataStore {
    inner: InMemoryMetadataStore,
    barrier: Barrier,
    pub upserts: Mutex<Vec<MediaMetadata>>,
}

impl InterleavingMetadataStore {
    pub fn new(inner: InMemoryMetadataStore, parties: usize) -> Arc<Self> {
        Arc::new(Self {
            inner,
            barrier: Barrier::new(parties),
            upserts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl MetadataStore for InterleavingMetadataStore {
    async fn create(&self, item: &MediaMetadata) -> MetadataStoreResult<MediaMetadata> {
        self.inner.create(item).await
    }

    async fn read(&self, id: &str, partition_key: &str) -> MetadataStoreResult<MediaMetadata> {
        let item = self.inner.read(id, partition_key).await;
        self.barrier.wait().await;
        item
    }

    async fn upsert(&self, item: &MediaMetadata) -> MetadataStoreResult<MediaMetadata> {
        let written = self.inner.upsert(item).await?;
        self.upserts.lock().unwrap().push(written.clone());
        Ok(written)
    }

    async fn read_all(&self) -> MetadataStoreResult<Vec<MediaMetadata>> {
        self.inner.read_all().await
    }

    async fn delete(&self, id: &str, partition_key: &str) -> MetadataStoreResult<()> {
        self.inner.delete(id, partition_key).await
    }

    async fn ping(&self) -> MetadataStoreResult<()> {
        self.inner.ping().await
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Memory
    }
}
