//! Media metadata document.
//!
//! One document per uploaded file, partitioned by `userId`. Field names are
//! serialized in camelCase because they are the stored document's property
//! names as well as the API's JSON shape.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub blob_name: String,
    pub file_name: String,
    /// Fields added by clients through updates. Kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Unique blob name for an uploaded file: a random v4 UUID, an underscore, then
/// the original filename verbatim.
pub fn generate_blob_name(file_name: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), file_name)
}

impl MediaMetadata {
    /// Create a record for a freshly uploaded blob with a new random id.
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        blob_name: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: title.into(),
            blob_name: blob_name.into(),
            file_name: file_name.into(),
            extra: Map::new(),
        }
    }

    /// Partition key value of this record.
    pub fn partition_key(&self) -> &str {
        &self.user_id
    }

    /// Shallow-merge `patch` onto this record and return the merged record.
    ///
    /// Patch fields win; fields absent from the patch keep their values. `id` is
    /// immutable and ignored if present. Known fields must stay strings.
    pub fn merged_with(&self, patch: Map<String, Value>) -> Result<MediaMetadata, AppError> {
        let mut document = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut document {
            for (key, value) in patch {
                if key == "id" {
                    continue;
                }
                fields.insert(key, value);
            }
        }

        serde_json::from_value(document).map_err(|e| {
            AppError::InvalidInput(format!("Update would produce an invalid record: {}", e))
        })
    }
}
