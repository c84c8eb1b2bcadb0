use axum::{extract::State, http::Uri, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Instant;
use utoipa::OpenApi;

use super::middleware::missing_route;
use super::openapi::ApiDoc;
use crate::errors::AppError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub instance_id: String,
    pub started_at: Instant,
}

impl AppStateInner {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            started_at: Instant::now(),
        }
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value),
        (status = 500, description = "Unexpected failure", body = crate::errors::ErrorResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": state.instance_id,
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    }))
}

/// OpenAPI document
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Unmatched routes
pub async fn fallback(uri: Uri) -> AppError {
    missing_route(uri.path())
}
