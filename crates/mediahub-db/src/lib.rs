//! MediaHub metadata store
//!
//! Document store for [`MediaMetadata`](mediahub_core::MediaMetadata) records,
//! partitioned by `userId`. The production backend talks to the Cosmos DB SQL
//! REST API; an in-memory backend with the same partition semantics serves
//! development and tests.

pub mod cosmos;
pub mod factory;
pub mod memory;
pub mod traits;

pub use cosmos::CosmosMetadataStore;
pub use factory::create_metadata_store;
pub use mediahub_core::MetadataBackend;
pub use memory::InMemoryMetadataStore;
pub use traits::{MetadataStore, MetadataStoreError, MetadataStoreResult};
