//! Fixed store names and fallback values.
//!
//! Container, database and partition names are part of the deployment contract
//! and are intentionally not configurable.

/// Blob container holding uploaded file bytes.
pub const BLOB_CONTAINER_NAME: &str = "mediafiles";

/// Cosmos DB database holding the metadata container.
pub const METADATA_DATABASE_NAME: &str = "MediaDB";

/// Cosmos DB container holding one document per uploaded file.
pub const METADATA_CONTAINER_NAME: &str = "MediaMetadata";

/// Partition key path of the metadata container.
pub const PARTITION_KEY_PATH: &str = "/userId";

/// Provisioned throughput (RU/s) used when the metadata container is created.
pub const METADATA_CONTAINER_THROUGHPUT: u32 = 400;

/// Partition key used when a request does not name a user.
pub const DEFAULT_USER_ID: &str = "default_user";

/// Title used when an upload does not supply one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Content type recorded for file parts that do not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
