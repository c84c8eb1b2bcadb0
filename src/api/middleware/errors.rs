use axum::{
    body,
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, error};

use crate::errors::{translate, AppError, Enveloped, PendingFailure};

/// Upper bound on how much of a framework error body is kept for the log
const DIAGNOSTIC_BODY_LIMIT: usize = 4096;

/// Rewrites failed responses into the error envelope for the current path.
///
/// Handlers and extractors surface an [`AppError`] through its
/// `IntoResponse`, which leaves a [`PendingFailure`] in the response
/// extensions. Failures produced by the framework itself (wrong method,
/// rejections of plain extractors) carry none and are adopted here. The
/// path is captured before dispatch and handed to [`translate`] explicitly.
pub async fn translate_errors(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    if response.extensions().get::<Enveloped>().is_some() {
        return response;
    }

    let headers = std::mem::take(response.headers_mut());
    let pending = response.extensions_mut().remove::<PendingFailure>();
    let failure = match pending {
        Some(PendingFailure(failure)) => failure,
        None if response.status().is_client_error() || response.status().is_server_error() => {
            Arc::new(adopt_framework_failure(response, &path).await)
        }
        None => {
            *response.headers_mut() = headers;
            return response;
        }
    };

    let (status, body) = translate(&failure, &path);

    if status.is_server_error() {
        error!(
            path = %path,
            kind = %failure.kind(),
            error = ?failure,
            "Request failed"
        );
    } else {
        debug!(
            path = %path,
            kind = %failure.kind(),
            error = %failure,
            "Request rejected"
        );
    }

    let mut translated = (status, Json(body)).into_response();
    carry_headers(headers, &mut translated);
    translated.extensions_mut().insert(failure.kind());
    translated
}

/// Not-found failure for a path no route serves
pub fn missing_route(path: &str) -> AppError {
    AppError::not_found(format!("Nenhum recurso encontrado em {path}"))
}

/// A bare 404 is a missing resource; anything else falls to the generic row.
async fn adopt_framework_failure(response: Response, path: &str) -> AppError {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return missing_route(path);
    }

    let raw = body::to_bytes(response.into_body(), DIAGNOSTIC_BODY_LIMIT)
        .await
        .unwrap_or_default();

    AppError::internal(anyhow::anyhow!(
        "{} produced outside the error boundary: {}",
        status,
        String::from_utf8_lossy(&raw)
    ))
}

/// Keep headers set next to the failure, minus those describing the old body
fn carry_headers(headers: HeaderMap, response: &mut Response) {
    let mut name = None;
    for (next_name, value) in headers {
        if next_name.is_some() {
            name = next_name;
        }
        let Some(name) = name.as_ref() else {
            continue;
        };
        if *name == header::CONTENT_TYPE || *name == header::CONTENT_LENGTH {
            continue;
        }
        response.headers_mut().append(name.clone(), value);
    }
}

/// Panic handler for `CatchPanicLayer`: a panicking handler is an
/// unhandled failure like any other.
pub fn catch_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "non-string panic payload".to_string()
    };

    AppError::internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use axum::http::StatusCode;

    #[test]
    fn test_catch_panic_str_payload() {
        let response = catch_panic(Box::new("attempt to divide by zero"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let pending = response.extensions().get::<PendingFailure>().unwrap();
        assert_eq!(pending.0.kind(), ErrorKind::Internal);
        assert!(pending.0.to_string().contains("divide by zero"));
    }

    #[test]
    fn test_carry_headers_skips_body_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        headers.insert(header::CONTENT_LENGTH, "12".parse().unwrap());
        headers.insert(header::ALLOW, "GET,HEAD".parse().unwrap());
        headers.append("x-trace", "a".parse().unwrap());
        headers.append("x-trace", "b".parse().unwrap());

        let mut response = (StatusCode::BAD_REQUEST, Json(serde_json::json!({}))).into_response();
        carry_headers(headers, &mut response);

        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert!(response.headers().get(header::CONTENT_LENGTH).is_none());
        assert_eq!(response.headers()[header::ALLOW], "GET,HEAD");
        let traces: Vec<_> = response.headers().get_all("x-trace").iter().collect();
        assert_eq!(traces, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_framework_404_is_missing_route() {
        let response = StatusCode::NOT_FOUND.into_response();
        let failure = adopt_framework_failure(response, "/nada").await;
        assert_eq!(failure.kind(), ErrorKind::NotFound);
        assert_eq!(failure.to_string(), "Nenhum recurso encontrado em /nada");
    }

    #[tokio::test]
    async fn test_other_framework_failures_are_internal() {
        let response = (StatusCode::BAD_REQUEST, "Failed to deserialize query string").into_response();
        let failure = adopt_framework_failure(response, "/dividir").await;
        assert_eq!(failure.kind(), ErrorKind::Internal);
        assert!(failure.to_string().contains("Failed to deserialize query string"));
    }

    #[test]
    fn test_catch_panic_opaque_payload() {
        let response = catch_panic(Box::new(42_u8));
        let pending = response.extensions().get::<PendingFailure>().unwrap();
        assert!(pending.0.to_string().contains("non-string panic payload"));
    }
}
