use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::ErrorKind;

/// Logs every request and its outcome with structured fields.
///
/// Failed responses carry the [`ErrorKind`] left by `translate_errors`, so
/// this layer must wrap that one.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or("").to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = %sanitize_query(&query),
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    match response.extensions().get::<ErrorKind>() {
        Some(kind) => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            kind = %kind,
            duration_ms = %duration.as_millis(),
            "Request failed"
        ),
        None => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed"
        ),
    }

    response
}

/// Mask values of credential-like query parameters
fn sanitize_query(query: &str) -> String {
    const SENSITIVE: &[&str] = &["token", "senha", "password", "secret", "api_key"];

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SENSITIVE.contains(&key.to_ascii_lowercase().as_str()) => {
                format!("{key}=***")
            }
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}
