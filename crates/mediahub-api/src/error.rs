//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Store errors
//! convert into `HttpAppError` through the `From` impls below, so every store
//! call renders the same `{ "error", "code" }` body.

use axum::{
    extract::multipart::MultipartRejection,
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mediahub_core::{AppError, ErrorMetadata, LogLevel};
use mediahub_db::MetadataStoreError;
use mediahub_infra::ErrorResponse;
use mediahub_storage::BlobStoreError;
use serde::de::DeserializeOwned;

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from mediahub-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// A request that is not `multipart/form-data` cannot carry a file part.
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Upload body is not multipart");
        HttpAppError(AppError::InvalidInput("No file provided".to_string()))
    }
}

impl From<BlobStoreError> for HttpAppError {
    fn from(err: BlobStoreError) -> Self {
        let app = match err {
            BlobStoreError::InvalidName(_) => AppError::InvalidInput(err.to_string()),
            BlobStoreError::Config(msg) => AppError::Internal(msg),
            other => AppError::BlobStore(other.to_string()),
        };
        HttpAppError(app)
    }
}

/// Every metadata failure, including a missing record, is a storage error (500).
impl From<MetadataStoreError> for HttpAppError {
    fn from(err: MetadataStoreError) -> Self {
        let app = match err {
            MetadataStoreError::Config(msg) => AppError::Internal(msg),
            other => AppError::MetadataStore(other.to_string()),
        };
        HttpAppError(app)
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                error_type = error_type,
                details = %error.detailed_message(),
                "Error occurred"
            );
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

/// Response body for `error`. Raw store text is only hidden in production.
fn error_body(error: &AppError, is_production: bool) -> ErrorResponse {
    let message = if is_production && error.is_sensitive() {
        error.client_message()
    } else {
        error.to_string()
    };

    ErrorResponse {
        error: message,
        code: error.error_code().to_string(),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (status, Json(error_body(app_error, is_production_env()))).into_response()
    }
}
