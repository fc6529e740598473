//! Cosmos DB (SQL API) metadata store over the REST interface.

mod auth;

pub use auth::{http_date, MasterKey};

use crate::traits::{MetadataStore, MetadataStoreError, MetadataStoreResult};
use crate::MetadataBackend;
use async_trait::async_trait;
use mediahub_core::constants::{METADATA_CONTAINER_THROUGHPUT, PARTITION_KEY_PATH};
use mediahub_core::MediaMetadata;
use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};

const API_VERSION: &str = "2018-12-31";
const PAGE_SIZE: &str = "100";

/// Properties Cosmos adds to every stored document.
const SYSTEM_PROPERTIES: [&str; 5] = ["_rid", "_self", "_etag", "_attachments", "_ts"];

/// One page of a document read feed
#[derive(Debug, Deserialize)]
struct DocumentFeed {
    #[serde(rename = "Documents", default)]
    documents: Vec<Value>,
}

/// Cosmos DB error body
#[derive(Debug, Deserialize)]
struct CosmosErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// A single REST call against the account.
struct CosmosRequest<'a> {
    method: Method,
    path: String,
    resource_type: &'static str,
    resource_link: String,
    partition_key: Option<&'a str>,
    headers: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl<'a> CosmosRequest<'a> {
    fn new(method: Method, resource_type: &'static str, resource_link: String) -> Self {
        Self {
            method,
            path: resource_link.clone(),
            resource_type,
            resource_link,
            partition_key: None,
            headers: Vec::new(),
            body: None,
        }
    }

    fn path(mut self, path: String) -> Self {
        self.path = path;
        self
    }

    fn partition_key(mut self, partition_key: &'a str) -> Self {
        self.partition_key = Some(partition_key);
        self
    }

    fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Cosmos DB metadata store
#[derive(Clone)]
pub struct CosmosMetadataStore {
    client: reqwest::Client,
    endpoint: String,
    key: MasterKey,
    database: String,
    container: String,
}

impl CosmosMetadataStore {
    /// Create a new store for `database`/`container` on the account at `endpoint`.
    ///
    /// `master_key` is the base64 account key from the portal.
    pub fn new(
        endpoint: &str,
        master_key: &str,
        database: impl Into<String>,
        container: impl Into<String>,
    ) -> MetadataStoreResult<Self> {
        let endpoint = endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(MetadataStoreError::Config(
                "COSMOS_ENDPOINT must not be empty".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            key: MasterKey::from_base64(master_key)?,
            database: database.into(),
            container: container.into(),
        })
    }

    fn database_link(&self) -> String {
        format!("dbs/{}", self.database)
    }

    fn container_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.container)
    }

    fn document_link(&self, id: &str) -> String {
        format!("{}/docs/{}", self.container_link(), id)
    }

    fn document_path(&self, id: &str) -> String {
        format!("{}/docs/{}", self.container_link(), urlencoding::encode(id))
    }

    async fn send(&self, request: CosmosRequest<'_>) -> MetadataStoreResult<Response> {
        let date = http_date(chrono::Utc::now());
        let authorization = self.key.authorization(
            &request.method,
            request.resource_type,
            &request.resource_link,
            &date,
        )?;

        let url = format!("{}/{}", self.endpoint, request.path);
        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header("authorization", authorization)
            .header("x-ms-date", date)
            .header("x-ms-version", API_VERSION)
            .header("accept", "application/json");

        if let Some(partition_key) = request.partition_key {
            builder = builder.header(
                "x-ms-documentdb-partitionkey",
                serde_json::to_string(&[partition_key])?,
            );
        }
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.json(&body);
        }

        let start = std::time::Instant::now();
        let response = builder.send().await?;
        let status = response.status();

        tracing::debug!(
            method = %request.method,
            resource = %request.resource_link,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Cosmos request completed"
        );

        if status.is_success() {
            return Ok(response);
        }

        Err(Self::error_from(status, response.text().await.unwrap_or_default()))
    }

    fn error_from(status: StatusCode, body: String) -> MetadataStoreError {
        let message = match serde_json::from_str::<CosmosErrorBody>(&body) {
            Ok(CosmosErrorBody {
                code: Some(code),
                message: Some(message),
            }) => format!("({}) {}", code, message),
            Ok(CosmosErrorBody {
                message: Some(message),
                ..
            }) => message,
            _ if body.is_empty() => status.to_string(),
            _ => body,
        };

        match status {
            StatusCode::NOT_FOUND => MetadataStoreError::NotFound(message),
            StatusCode::CONFLICT => MetadataStoreError::Conflict(message),
            _ => MetadataStoreError::Backend(format!("{}: {}", status, message)),
        }
    }

    /// Drop the Cosmos system properties and parse the record. Client fields
    /// that merely start with `_` are kept.
    fn into_metadata(document: Value) -> MetadataStoreResult<MediaMetadata> {
        let document = match document {
            Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .filter(|(key, _)| !SYSTEM_PROPERTIES.contains(&key.as_str()))
                    .collect::<Map<String, Value>>(),
            ),
            other => other,
        };
        Ok(serde_json::from_value(document)?)
    }

    async fn write_document(
        &self,
        item: &MediaMetadata,
        upsert: bool,
    ) -> MetadataStoreResult<MediaMetadata> {
        let mut request = CosmosRequest::new(Method::POST, "docs", self.container_link())
            .path(format!("{}/docs", self.container_link()))
            .partition_key(item.partition_key())
            .json(serde_json::to_value(item)?);
        if upsert {
            request = request.header("x-ms-documentdb-is-upsert", "True");
        }

        let response = self.send(request).await?;
        let document: Value = response.json().await?;
        Self::into_metadata(document)
    }

    async fn create_if_missing(&self, request: CosmosRequest<'_>, what: &str) -> MetadataStoreResult<()> {
        match self.send(request).await {
            Ok(_) => {
                tracing::info!(resource = %what, "Created Cosmos resource");
                Ok(())
            }
            Err(MetadataStoreError::Conflict(_)) => {
                tracing::debug!(resource = %what, "Cosmos resource already exists");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Create the database and the partitioned container if they do not exist yet.
    pub async fn ensure_container(&self) -> MetadataStoreResult<()> {
        let database = CosmosRequest::new(Method::POST, "dbs", String::new())
            .path("dbs".to_string())
            .json(json!({ "id": self.database }));
        self.create_if_missing(database, &self.database_link()).await?;

        let container = CosmosRequest::new(Method::POST, "colls", self.database_link())
            .path(format!("{}/colls", self.database_link()))
            .header("x-ms-offer-throughput", METADATA_CONTAINER_THROUGHPUT.to_string())
            .json(json!({
                "id": self.container,
                "partitionKey": { "paths": [PARTITION_KEY_PATH], "kind": "Hash" }
            }));
        self.create_if_missing(container, &self.container_link()).await
    }
}

#[async_trait]
impl MetadataStore for CosmosMetadataStore {
    async fn create(&self, item: &MediaMetadata) -> MetadataStoreResult<MediaMetadata> {
        self.write_document(item, false).await
    }

    async fn read(&self, id: &str, partition_key: &str) -> MetadataStoreResult<MediaMetadata> {
        let request = CosmosRequest::new(Method::GET, "docs", self.document_link(id))
            .path(self.document_path(id))
            .partition_key(partition_key);
        let response = self.send(request).await?;
        let document: Value = response.json().await?;
        Self::into_metadata(document)
    }

    async fn upsert(&self, item: &MediaMetadata) -> MetadataStoreResult<MediaMetadata> {
        self.write_document(item, true).await
    }

    async fn read_all(&self) -> MetadataStoreResult<Vec<MediaMetadata>> {
        let mut items = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = CosmosRequest::new(Method::GET, "docs", self.container_link())
                .path(format!("{}/docs", self.container_link()))
                .header("x-ms-max-item-count", PAGE_SIZE)
                .header("x-ms-documentdb-query-enablecrosspartition", "True");
            if let Some(token) = continuation.take() {
                request = request.header("x-ms-continuation", token);
            }

            let response = self.send(request).await?;
            continuation = response
                .headers()
                .get("x-ms-continuation")
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(String::from);

            let page: DocumentFeed = response.json().await?;
            for document in page.documents {
                match Self::into_metadata(document) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        tracing::warn!(error = %e, "Skipping document that is not a media record");
                    }
                }
            }

            if continuation.is_none() {
                break;
            }
        }

        Ok(items)
    }

    async fn delete(&self, id: &str, partition_key: &str) -> MetadataStoreResult<()> {
        let request = CosmosRequest::new(Method::DELETE, "docs", self.document_link(id))
            .path(self.document_path(id))
            .partition_key(partition_key);
        self.send(request).await?;
        Ok(())
    }

    async fn ping(&self) -> MetadataStoreResult<()> {
        let request = CosmosRequest::new(Method::GET, "colls", self.container_link());
        self.send(request).await?;
        Ok(())
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Cosmos
    }
}
