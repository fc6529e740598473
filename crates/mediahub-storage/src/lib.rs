//! MediaHub Storage Library
//!
//! Blob storage abstraction for uploaded file bytes. A single implementation,
//! [`ObjectBlobStore`], is backed by `object_store` and can target Azure Blob
//! Storage, a local directory, or process memory.
//!
//! # Blob names
//!
//! A blob name is the object key inside the configured container, byte for
//! byte. Nothing is percent-encoded, so the `blobName` recorded in metadata
//! locates the stored object directly. Names the key space cannot hold
//! unchanged (empty or `.`/`..` segments, a leading or trailing `/`) are
//! rejected with [`BlobStoreError::InvalidName`].

pub mod connection;
pub mod factory;
pub mod object;
pub mod traits;

// Re-export commonly used types
pub use connection::AzureConnectionString;
pub use factory::create_blob_store;
pub use mediahub_core::BlobBackend;
pub use object::ObjectBlobStore;
pub use traits::{BlobStore, BlobStoreError, BlobStoreResult};
