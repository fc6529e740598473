//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;
use mediahub_core::MediaMetadata;
use mediahub_infra::ErrorResponse;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MediaHub API",
        version = "0.1.0",
        description = "Upload media files to blob storage and manage their metadata records, partitioned by user id."
    ),
    paths(
        handlers::media_upload::upload_media,
        handlers::media_list::list_media,
        handlers::media_update::update_media,
        handlers::media_delete::delete_media,
    ),
    components(schemas(
        MediaMetadata,
        ErrorResponse,
        handlers::media_upload::UploadResponse,
        handlers::MessageResponse,
    )),
    tags(
        (name = "media", description = "Media upload and metadata management")
    )
)]
pub struct ApiDoc;
