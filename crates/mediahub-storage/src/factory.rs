use crate::connection::AzureConnectionString;
use crate::{BlobBackend, BlobStore, BlobStoreError, BlobStoreResult, ObjectBlobStore};
use mediahub_core::constants::BLOB_CONTAINER_NAME;
use mediahub_core::Config;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::local::LocalFileSystem;
use std::path::PathBuf;
use std::sync::Arc;

/// Create a blob store based on configuration
pub async fn create_blob_store(config: &Config) -> BlobStoreResult<Arc<dyn BlobStore>> {
    match config.blob_backend() {
        BlobBackend::Azure => {
            let raw = config.blob_connection_string().ok_or_else(|| {
                BlobStoreError::Config("AZURE_BLOB_CONNECTION_STRING not configured".to_string())
            })?;
            let connection = AzureConnectionString::parse(raw)?;
            let store = build_azure_store(&connection, BLOB_CONTAINER_NAME)?;
            Ok(Arc::new(store))
        }

        BlobBackend::Local => {
            let base_path = config.local_storage_path().ok_or_else(|| {
                BlobStoreError::Config("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let store = build_local_store(PathBuf::from(base_path), BLOB_CONTAINER_NAME).await?;
            Ok(Arc::new(store))
        }

        BlobBackend::Memory => {
            tracing::warn!("Using in-memory blob store; uploaded files are lost on restart");
            Ok(Arc::new(ObjectBlobStore::in_memory(BLOB_CONTAINER_NAME)))
        }
    }
}

/// Azure Blob Storage scoped to `container`.
pub fn build_azure_store(
    connection: &AzureConnectionString,
    container: &str,
) -> BlobStoreResult<ObjectBlobStore> {
    let mut builder = MicrosoftAzureBuilder::new().with_container_name(container);

    match connection {
        AzureConnectionString::DevelopmentStorage => {
            builder = builder.with_use_emulator(true);
        }
        AzureConnectionString::SharedKey {
            account_name,
            account_key,
            blob_endpoint,
        } => {
            builder = builder
                .with_account(account_name.clone())
                .with_access_key(account_key.clone());
            if let Some(endpoint) = blob_endpoint {
                builder = builder
                    .with_endpoint(endpoint.clone())
                    .with_allow_http(endpoint.starts_with("http://"));
            }
        }
    }

    let store = builder
        .build()
        .map_err(|e| BlobStoreError::Config(e.to_string()))?;

    tracing::info!(container = %container, "Azure blob store initialized");

    Ok(ObjectBlobStore::new(
        Arc::new(store),
        container,
        BlobBackend::Azure,
    ))
}

/// Local directory store; blobs live under `{base_path}/{container}`.
pub async fn build_local_store(
    base_path: PathBuf,
    container: &str,
) -> BlobStoreResult<ObjectBlobStore> {
    let root = base_path.join(container);
    tokio::fs::create_dir_all(&root).await.map_err(|e| {
        BlobStoreError::Config(format!(
            "Failed to create storage directory {}: {}",
            root.display(),
            e
        ))
    })?;

    let fs = LocalFileSystem::new_with_prefix(&root)
        .map_err(|e| BlobStoreError::Config(e.to_string()))?;

    tracing::info!(path = %root.display(), "Local blob store initialized");

    Ok(ObjectBlobStore::new(Arc::new(fs), container, BlobBackend::Local))
}
