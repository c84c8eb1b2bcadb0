use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::handlers::{fallback, health, openapi_json, AppState};
use super::middleware::{catch_panic, logging_middleware, translate_errors};
use crate::config::HttpConfig;

pub fn create_router(state: AppState, http: &HttpConfig) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state);

    with_error_boundary(routes, http)
}

/// Install the fallback and the failure-handling stack around `router`.
///
/// Every response leaving the returned router that stems from a failure,
/// including unmatched routes and panicking handlers, carries the JSON
/// error envelope.
pub fn with_error_boundary(router: Router, http: &HttpConfig) -> Router {
    // Layers wrap outward: panic catching runs innermost, tracing outermost.
    router
        .fallback(fallback)
        .layer(CatchPanicLayer::custom(catch_panic))
        .layer(DefaultBodyLimit::max(http.body_limit_bytes))
        .layer(middleware::from_fn(translate_errors))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
