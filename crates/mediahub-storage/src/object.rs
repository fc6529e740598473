use crate::traits::{BlobStore, BlobStoreError, BlobStoreResult};
use crate::BlobBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::path::Path;
use object_store::{
    Attribute, Attributes, Error as ObjectStoreError, ObjectStore, ObjectStoreExt, PutOptions,
    PutPayload,
};
use std::sync::Arc;

/// Blob store backed by an `object_store` implementation
#[derive(Clone)]
pub struct ObjectBlobStore {
    store: Arc<dyn ObjectStore>,
    container: String,
    backend: BlobBackend,
}

impl ObjectBlobStore {
    /// Wrap an object store that is already scoped to `container`.
    pub fn new(store: Arc<dyn ObjectStore>, container: impl Into<String>, backend: BlobBackend) -> Self {
        Self {
            store,
            container: container.into(),
            backend,
        }
    }

    /// In-memory store for development and tests.
    pub fn in_memory(container: impl Into<String>) -> Self {
        Self::new(
            Arc::new(object_store::memory::InMemory::new()),
            container,
            BlobBackend::Memory,
        )
    }

    /// Use the blob name verbatim as the object key.
    ///
    /// Names that `object_store` would rewrite (empty segments, `.` or `..`
    /// segments, a leading or trailing `/`) are rejected,
    /// so the stored key always equals the name handed in.
    fn location(blob_name: &str) -> BlobStoreResult<Path> {
        if blob_name.is_empty() {
            return Err(BlobStoreError::InvalidName(
                "Blob name must not be empty".to_string(),
            ));
        }
        let location = Path::parse(blob_name)
            .map_err(|e| BlobStoreError::InvalidName(format!("{}: {}", blob_name, e)))?;
        if location.as_ref() != blob_name {
            return Err(BlobStoreError::InvalidName(format!(
                "{}: not usable as an object key",
                blob_name
            )));
        }
        Ok(location)
    }

    /// Local filesystem objects cannot carry attributes.
    fn put_options(&self, content_type: &str) -> PutOptions {
        let mut attributes = Attributes::new();
        if self.backend != BlobBackend::Local {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
        }
        PutOptions {
            attributes,
            ..Default::default()
        }
    }
}

#[async_trait]
impl BlobStore for ObjectBlobStore {
    async fn upload(
        &self,
        blob_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> BlobStoreResult<()> {
        let location = Self::location(blob_name)?;
        let size = data.len();
        let start = std::time::Instant::now();

        self.store
            .put_opts(&location, PutPayload::from(data), self.put_options(content_type))
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    container = %self.container,
                    blob_name = %blob_name,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Blob upload failed"
                );
                BlobStoreError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            backend = %self.backend,
            container = %self.container,
            blob_name = %blob_name,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Blob upload successful"
        );

        Ok(())
    }

    async fn download(&self, blob_name: &str) -> BlobStoreResult<Bytes> {
        let location = Self::location(blob_name)?;

        let result = self.store.get(&location).await.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => BlobStoreError::NotFound(blob_name.to_string()),
            other => BlobStoreError::Backend(other.to_string()),
        })?;

        result
            .bytes()
            .await
            .map_err(|e| BlobStoreError::Backend(e.to_string()))
    }

    async fn content_type(&self, blob_name: &str) -> BlobStoreResult<Option<String>> {
        let location = Self::location(blob_name)?;

        let result = self.store.get(&location).await.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => BlobStoreError::NotFound(blob_name.to_string()),
            other => BlobStoreError::Backend(other.to_string()),
        })?;

        Ok(result.attributes.get(&Attribute::ContentType).map(|value| {
            let content_type: &str = value.as_ref();
            content_type.to_string()
        }))
    }

    async fn exists(&self, blob_name: &str) -> BlobStoreResult<bool> {
        let location = Self::location(blob_name)?;
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(BlobStoreError::Backend(e.to_string())),
        }
    }

    async fn delete(&self, blob_name: &str) -> BlobStoreResult<()> {
        let location = Self::location(blob_name)?;
        match self.store.delete(&location).await {
            Ok(()) | Err(ObjectStoreError::NotFound { .. }) => {
                tracing::info!(
                    container = %self.container,
                    blob_name = %blob_name,
                    "Blob delete successful"
                );
                Ok(())
            }
            Err(e) => Err(BlobStoreError::Backend(e.to_string())),
        }
    }

    async fn list(&self) -> BlobStoreResult<Vec<String>> {
        let objects: Vec<_> = self
            .store
            .list(None)
            .try_collect()
            .await
            .map_err(|e| BlobStoreError::Backend(e.to_string()))?;

        Ok(objects
            .into_iter()
            .map(|meta| meta.location.as_ref().to_string())
            .collect())
    }

    fn container(&self) -> &str {
        &self.container
    }

    fn backend_type(&self) -> BlobBackend {
        self.backend
    }
}
