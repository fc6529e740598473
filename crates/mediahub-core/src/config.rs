//! Configuration module
//!
//! This module provides the configuration structures for the API and the two
//! external stores, plus the default-value policy applied to absent request
//! fields.

use std::env;

use crate::constants::{DEFAULT_TITLE, DEFAULT_USER_ID};
use crate::storage_types::{BlobBackend, MetadataBackend};

// Common constants
const SERVER_PORT: u16 = 5000;
const MAX_UPLOAD_SIZE_MB: usize = 100;

/// Fallback values for fields a request may omit.
///
/// Absent `userId` and `title` silently become these values. The user id doubles
/// as the metadata partition key, so records created without one all land in
/// the same partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaDefaults {
    pub user_id: String,
    pub title: String,
}

impl Default for MediaDefaults {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl MediaDefaults {
    /// Supplied user id, or the fallback when absent.
    pub fn user_id_or_default(&self, user_id: Option<String>) -> String {
        user_id.unwrap_or_else(|| self.user_id.clone())
    }

    /// Supplied title, or the fallback when absent.
    pub fn title_or_default(&self, title: Option<String>) -> String {
        title.unwrap_or_else(|| self.title.clone())
    }
}

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub service_name: String,
    pub max_upload_size_bytes: usize,
}

/// Store connection settings and request defaults
#[derive(Clone, Debug)]
pub struct MediaHubConfig {
    pub base: BaseConfig,
    pub blob_backend: BlobBackend,
    pub blob_connection_string: Option<String>,
    pub local_storage_path: Option<String>,
    pub metadata_backend: MetadataBackend,
    pub cosmos_endpoint: Option<String>,
    pub cosmos_key: Option<String>,
    pub defaults: MediaDefaults,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<MediaHubConfig>);

impl Config {
    fn inner(&self) -> &MediaHubConfig {
        &self.0
    }

    pub fn new(config: MediaHubConfig) -> Self {
        Config(Box::new(config))
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = MediaHubConfig::from_source(|key| env::var(key).ok())?;
        Ok(Config::new(config))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.inner().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn service_name(&self) -> &str {
        &self.inner().base.service_name
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().base.max_upload_size_bytes
    }

    pub fn blob_backend(&self) -> BlobBackend {
        self.inner().blob_backend
    }

    pub fn blob_connection_string(&self) -> Option<&str> {
        self.inner().blob_connection_string.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn metadata_backend(&self) -> MetadataBackend {
        self.inner().metadata_backend
    }

    pub fn cosmos_endpoint(&self) -> Option<&str> {
        self.inner().cosmos_endpoint.as_deref()
    }

    pub fn cosmos_key(&self) -> Option<&str> {
        self.inner().cosmos_key.as_deref()
    }

    pub fn defaults(&self) -> &MediaDefaults {
        &self.inner().defaults
    }
}

impl MediaHubConfig {
    /// Build configuration from a key lookup (the process environment in production).
    pub fn from_source<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let blob_backend = match lookup("BLOB_BACKEND") {
            Some(value) => value.parse()?,
            None => BlobBackend::Azure,
        };

        let metadata_backend = match lookup("METADATA_BACKEND") {
            Some(value) => value.parse()?,
            None => MetadataBackend::Cosmos,
        };

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "mediahub-api".to_string()),
            max_upload_size_bytes: lookup("MAX_UPLOAD_SIZE_MB")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(MAX_UPLOAD_SIZE_MB)
                * 1024
                * 1024,
        };

        let defaults = MediaDefaults {
            user_id: lookup("DEFAULT_USER_ID").unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            title: lookup("DEFAULT_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        };

        Ok(MediaHubConfig {
            base,
            blob_backend,
            blob_connection_string: lookup("AZURE_BLOB_CONNECTION_STRING"),
            local_storage_path: lookup("LOCAL_STORAGE_PATH"),
            metadata_backend,
            cosmos_endpoint: lookup("COSMOS_ENDPOINT"),
            cosmos_key: lookup("COSMOS_KEY"),
            defaults,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.blob_backend {
            BlobBackend::Azure if self.blob_connection_string.is_none() => {
                return Err(anyhow::anyhow!(
                    "AZURE_BLOB_CONNECTION_STRING must be set when BLOB_BACKEND=azure"
                ));
            }
            BlobBackend::Local if self.local_storage_path.is_none() => {
                return Err(anyhow::anyhow!(
                    "LOCAL_STORAGE_PATH must be set when BLOB_BACKEND=local"
                ));
            }
            _ => {}
        }

        if self.metadata_backend == MetadataBackend::Cosmos {
            if self.cosmos_endpoint.is_none() {
                return Err(anyhow::anyhow!(
                    "COSMOS_ENDPOINT must be set when METADATA_BACKEND=cosmos"
                ));
            }
            if self.cosmos_key.is_none() {
                return Err(anyhow::anyhow!(
                    "COSMOS_KEY must be set when METADATA_BACKEND=cosmos"
                ));
            }
        }

        if self.base.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than zero"));
        }

        Ok(())
    }
}
