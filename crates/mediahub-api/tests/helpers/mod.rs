//! Test helpers: build AppState and router for integration tests.
//!
//! Both stores are in-memory, so no external services are needed.

pub mod stores;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use mediahub_api::setup::routes;
use mediahub_api::AppState;
use mediahub_core::{BaseConfig, BlobBackend, Config, MediaDefaults, MediaHubConfig, MetadataBackend};
use mediahub_db::{InMemoryMetadataStore, MetadataStore};
use mediahub_storage::{BlobStore, ObjectBlobStore};
use serde_json::Value;
use std::sync::Arc;

pub const MEDIA_PATH: &str = "/api/media";

pub fn media_path(id: &str) -> String {
    format!("{}/{}", MEDIA_PATH, id)
}

/// Test application: server plus direct handles on both stores.
pub struct TestApp {
    pub server: TestServer,
    pub blob_store: Arc<dyn BlobStore>,
    pub metadata_store: Arc<dyn MetadataStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config(max_upload_size_bytes: usize) -> Config {
    Config::new(MediaHubConfig {
        base: BaseConfig {
            server_port: 0,
            environment: "test".to_string(),
            service_name: "mediahub-api-test".to_string(),
            max_upload_size_bytes,
        },
        blob_backend: BlobBackend::Memory,
        blob_connection_string: None,
        local_storage_path: None,
        metadata_backend: MetadataBackend::Memory,
        cosmos_endpoint: None,
        cosmos_key: None,
        defaults: MediaDefaults::default(),
    })
}

/// App over fresh in-memory stores.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(
        Arc::new(ObjectBlobStore::in_memory("mediafiles")),
        Arc::new(InMemoryMetadataStore::new()),
    )
}

pub fn setup_test_app_with(
    blob_store: Arc<dyn BlobStore>,
    metadata_store: Arc<dyn MetadataStore>,
) -> TestApp {
    setup_test_app_with_config(create_test_config(10 * 1024 * 1024), blob_store, metadata_store)
}

pub fn setup_test_app_with_config(
    config: Config,
    blob_store: Arc<dyn BlobStore>,
    metadata_store: Arc<dyn MetadataStore>,
) -> TestApp {
    let state = Arc::new(AppState::new(
        config.clone(),
        blob_store.clone(),
        metadata_store.clone(),
    ));
    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        blob_store,
        metadata_store,
    }
}

/// Multipart form with a file part named `file`.
pub fn file_form(file_name: &str, content_type: &str, data: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_type(content_type.to_string()),
    )
}

/// Upload a file and return the `metadata` object from the 201 response.
pub async fn upload(client: &TestServer, form: MultipartForm) -> Value {
    let response = client.post(MEDIA_PATH).multipart(form).await;
    assert_eq!(response.status_code(), 201, "upload failed: {}", response.text());
    let body: Value = response.json();
    body["metadata"].clone()
}

/// Current list response as a JSON array.
pub async fn list(client: &TestServer) -> Vec<Value> {
    let response = client.get(MEDIA_PATH).await;
    assert_eq!(response.status_code(), 200);
    response.json::<Vec<Value>>()
}
