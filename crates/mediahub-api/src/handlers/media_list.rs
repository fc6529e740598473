use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::State, Json};
use mediahub_core::MediaMetadata;
use mediahub_infra::ErrorResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/media",
    tag = "media",
    responses(
        (status = 200, description = "Every record across all users", body = Vec<MediaMetadata>),
        (status = 500, description = "Metadata store failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_media"))]
pub async fn list_media(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MediaMetadata>>, HttpAppError> {
    let items = state.metadata_store.read_all().await?;
    tracing::debug!(count = items.len(), "Listed media");
    Ok(Json(items))
}
