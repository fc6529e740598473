//! Health check handlers and response types.

use crate::constants::{HEALTH_CHECK_BLOB_NAME, HEALTH_CHECK_TIMEOUT};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Run an async check with timeout; returns "ready", "timeout", or "not_ready: {error}".
async fn run_check<F, E>(timeout: Duration, f: F) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "ready".to_string(),
        Ok(Err(e)) => format!("not_ready: {}", e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ReadinessResponse {
    pub status: String,
    pub blob_store: String,
    pub metadata_store: String,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - both stores answer within the timeout.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let blob_store = state.blob_store.clone();
    let metadata_store = state.metadata_store.clone();

    let (blob_status, metadata_status) = tokio::join!(
        run_check(HEALTH_CHECK_TIMEOUT, async move {
            blob_store.exists(HEALTH_CHECK_BLOB_NAME).await.map(drop)
        }),
        run_check(HEALTH_CHECK_TIMEOUT, async move { metadata_store.ping().await }),
    );

    let ready = blob_status == "ready" && metadata_status == "ready";
    if !ready {
        tracing::error!(
            blob_store = %blob_status,
            metadata_store = %metadata_status,
            "Readiness check failed"
        );
    }

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "not_ready" }.to_string(),
            blob_store: blob_status,
            metadata_store: metadata_status,
        }),
    )
}
