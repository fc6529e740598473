use crate::error::HttpAppError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use mediahub_infra::ErrorResponse;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    /// Partition holding the record. Defaults to the fallback user id.
    user_id: Option<String>,
}

/// Deletes the metadata record only. The blob it references is left in place.
#[utoipa::path(
    delete,
    path = "/api/media/{id}",
    tag = "media",
    params(
        ("id" = String, Path, description = "Media record id"),
        DeleteQuery
    ),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 500, description = "Record not found in the partition, or store failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(media_id = %id, operation = "delete_media"))]
pub async fn delete_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    let partition_key = state.defaults().user_id_or_default(query.user_id);

    let item = state.metadata_store.read(&id, &partition_key).await?;
    state
        .metadata_store
        .delete(&item.id, item.partition_key())
        .await?;

    tracing::info!(
        user_id = %partition_key,
        blob_name = %item.blob_name,
        "Media record deleted; blob retained"
    );

    Ok(Json(MessageResponse::new("Deletion successful")))
}
