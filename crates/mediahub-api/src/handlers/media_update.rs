use crate::error::{HttpAppError, ValidatedJson};
use crate::handlers::MessageResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use mediahub_core::AppError;
use mediahub_infra::ErrorResponse;
use serde_json::{Map, Value};
use std::sync::Arc;

/// `userId` carried by an update body, if any. It must be a string when present.
fn body_user_id(body: &Map<String, Value>) -> Result<Option<String>, AppError> {
    match body.get("userId") {
        None => Ok(None),
        Some(Value::String(user_id)) => Ok(Some(user_id.clone())),
        Some(_) => Err(AppError::InvalidInput(
            "userId must be a string".to_string(),
        )),
    }
}

#[utoipa::path(
    put,
    path = "/api/media/{id}",
    tag = "media",
    params(
        ("id" = String, Path, description = "Media record id")
    ),
    request_body(content = inline(Object), description = "Fields to merge onto the record; optional userId selects the partition"),
    responses(
        (status = 200, description = "Record merged and written back", body = MessageResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
        (status = 500, description = "Record not found in the partition, or store failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, body), fields(media_id = %id, operation = "update_media"))]
pub async fn update_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<Map<String, Value>>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    let partition_key = state.defaults().user_id_or_default(body_user_id(&body)?);

    let existing = state.metadata_store.read(&id, &partition_key).await?;
    let merged = existing.merged_with(body)?;
    state.metadata_store.upsert(&merged).await?;

    tracing::info!(user_id = %partition_key, "Media updated");

    Ok(Json(MessageResponse::new("Update successful")))
}
