use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_media_form;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mediahub_core::{generate_blob_name, AppError, MediaMetadata};
use mediahub_infra::ErrorResponse;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub metadata: MediaMetadata,
}

#[utoipa::path(
    post,
    path = "/api/media",
    tag = "media",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored and metadata recorded", body = UploadResponse),
        (status = 400, description = "No file provided", body = ErrorResponse),
        (status = 500, description = "Blob or metadata store failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_media"))]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let start = Instant::now();
    let form = extract_media_form(multipart?).await?;

    let file = form
        .file
        .ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    let user_id = state.defaults().user_id_or_default(form.user_id);
    let title = state.defaults().title_or_default(form.title);

    let blob_name = generate_blob_name(&file.file_name);
    let size_bytes = file.data.len();

    state
        .blob_store
        .upload(&blob_name, &file.content_type, file.data)
        .await?;

    let metadata = MediaMetadata::new(user_id, title, blob_name.clone(), file.file_name);

    if let Err(e) = state.metadata_store.create(&metadata).await {
        // The blob has no record pointing at it anymore.
        let blob_store = state.blob_store.clone();
        let orphan = blob_name.clone();
        tokio::spawn(async move {
            if let Err(cleanup_err) = blob_store.delete(&orphan).await {
                tracing::warn!(
                    error = %cleanup_err,
                    blob_name = %orphan,
                    "Failed to clean up blob after metadata write error"
                );
            }
        });
        return Err(e.into());
    }

    tracing::info!(
        media_id = %metadata.id,
        user_id = %metadata.user_id,
        blob_name = %blob_name,
        content_type = %file.content_type,
        size_bytes = size_bytes,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Media uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Upload successful".to_string(),
            metadata,
        }),
    ))
}
