//! MediaHub Core Library
//!
//! This crate provides the domain model, error types, configuration and the
//! default-value policy shared by the storage, database and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, MediaDefaults, MediaHubConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{generate_blob_name, MediaMetadata};
pub use storage_types::{BlobBackend, MetadataBackend};
