use crate::traits::{MetadataStore, MetadataStoreError, MetadataStoreResult};
use crate::MetadataBackend;
use async_trait::async_trait;
use mediahub_core::MediaMetadata;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Key: (partition key, id)
type Documents = HashMap<(String, String), MediaMetadata>;

/// In-memory metadata store with Cosmos-like partition semantics
#[derive(Clone, Default)]
pub struct InMemoryMetadataStore {
    documents: Arc<RwLock<Documents>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(id: &str, partition_key: &str) -> (String, String) {
        (partition_key.to_string(), id.to_string())
    }

    fn not_found(id: &str) -> MetadataStoreError {
        MetadataStoreError::NotFound(format!(
            "Entity with the specified id does not exist in the system. id: {}",
            id
        ))
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn create(&self, item: &MediaMetadata) -> MetadataStoreResult<MediaMetadata> {
        let mut documents = self.documents.write().await;
        let key = Self::key(&item.id, item.partition_key());
        if documents.contains_key(&key) {
            return Err(MetadataStoreError::Conflict(format!(
                "Entity with the specified id already exists in the system. id: {}",
                item.id
            )));
        }
        documents.insert(key, item.clone());
        Ok(item.clone())
    }

    async fn read(&self, id: &str, partition_key: &str) -> MetadataStoreResult<MediaMetadata> {
        self.documents
            .read()
            .await
            .get(&Self::key(id, partition_key))
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn upsert(&self, item: &MediaMetadata) -> MetadataStoreResult<MediaMetadata> {
        self.documents
            .write()
            .await
            .insert(Self::key(&item.id, item.partition_key()), item.clone());
        Ok(item.clone())
    }

    async fn read_all(&self) -> MetadataStoreResult<Vec<MediaMetadata>> {
        Ok(self.documents.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: &str, partition_key: &str) -> MetadataStoreResult<()> {
        self.documents
            .write()
            .await
            .remove(&Self::key(id, partition_key))
            .map(drop)
            .ok_or_else(|| Self::not_found(id))
    }

    async fn ping(&self) -> MetadataStoreResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Memory
    }
}
