pub mod media;

pub use media::{generate_blob_name, MediaMetadata};
