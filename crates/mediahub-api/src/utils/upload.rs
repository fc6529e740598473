//! Multipart parsing for media uploads.

use axum::extract::Multipart;
use bytes::Bytes;
use mediahub_core::constants::DEFAULT_CONTENT_TYPE;
use mediahub_core::AppError;

/// The uploaded file part
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Fields of a `POST /api/media` form. Absent fields stay `None`.
#[derive(Debug, Default)]
pub struct MediaUploadForm {
    pub file: Option<UploadedFile>,
    pub title: Option<String>,
    pub user_id: Option<String>,
}

/// Read the `file`, `title` and `userId` parts of an upload form.
///
/// A file part without a filename (or with an empty one) counts as no file.
/// When a part is repeated the first occurrence wins. Unknown parts are
/// drained and ignored.
pub async fn extract_media_form(mut multipart: Multipart) -> Result<MediaUploadForm, AppError> {
    let mut form = MediaUploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                let file_name = field
                    .file_name()
                    .map(|s: &str| s.to_string())
                    .filter(|s| !s.is_empty());
                let content_type = field
                    .content_type()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                if form.file.is_none() {
                    form.file = file_name.map(|file_name| UploadedFile {
                        file_name,
                        content_type,
                        data,
                    });
                }
            }
            "title" | "userId" => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read field {}: {}", field_name, e))
                })?;
                let slot = if field_name == "title" {
                    &mut form.title
                } else {
                    &mut form.user_id
                };
                if slot.is_none() {
                    *slot = Some(value);
                }
            }
            _ => {
                field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read multipart: {}", e))
                })?;
            }
        }
    }

    Ok(form)
}
