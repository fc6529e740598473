//! Route configuration and setup

mod health;

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Json, Router,
};
use mediahub_core::Config;
use mediahub_infra::request_id_middleware;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub use health::{liveness_check, readiness_check};

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let app = public_routes()
        .merge(media_routes())
        // axum's 2 MB multipart default is replaced by the configured upload limit
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes()))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

/// Health probes and API documentation
fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(liveness_check))
        .route("/health/ready", get(readiness_check))
        .route(
            &format!("{}/openapi.json", API_PREFIX),
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

/// Media CRUD routes
fn media_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/media", API_PREFIX),
            get(handlers::media_list::list_media).post(handlers::media_upload::upload_media),
        )
        .route(
            &format!("{}/media/{{id}}", API_PREFIX),
            put(handlers::media_update::update_media).delete(handlers::media_delete::delete_media),
        )
}
