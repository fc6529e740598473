//! HTTP error body
//!
//! The `IntoResponse` conversion for `AppError` lives in `mediahub-api`
//! because of the orphan rule.

use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every failing route
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable error code, e.g. `METADATA_STORE_ERROR`
    pub code: String,
}
