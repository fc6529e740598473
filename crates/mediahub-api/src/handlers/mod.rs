use serde::Serialize;
use utoipa::ToSchema;

pub mod media_delete;
pub mod media_list;
pub mod media_update;
pub mod media_upload;

/// Body of the update and delete responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
