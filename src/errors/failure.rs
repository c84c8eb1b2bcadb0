use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use thiserror::Error;

use super::codes::ErrorKind;
use super::translator::translate;

/// One invalid field or violated constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field name or property path, e.g. `email` or `listar.pagina`
    pub path: String,
    /// Validator message, if it produced one
    pub message: Option<String>,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: Some(message.into()),
        }
    }

    /// Violation whose validator did not supply a message
    pub fn unlabeled(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: None,
        }
    }

    /// One violation per entry of a garde report, in report order
    pub fn from_report(report: &garde::Report) -> Vec<Self> {
        report
            .iter()
            .map(|(path, error)| Self::new(path.to_string(), error.message()))
            .collect()
    }
}

/// Every failure a request handler can surface.
///
/// Handlers return `Result<_, AppError>`; anything not modelled here enters
/// through `From<anyhow::Error>` as [`AppError::Internal`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("request body failed validation ({} violations)", .0.len())]
    Validation(Vec<Violation>),

    #[error("request parameters failed validation ({} violations)", .0.len())]
    InvalidParameters(Vec<Violation>),

    /// Diagnostic is logged, never sent to the client
    #[error("unreadable request body: {0}")]
    MalformedBody(String),

    #[error("{0}")]
    NotFound(String),

    /// Diagnostic is logged, never sent to the client
    #[error("data integrity violation: {0}")]
    DataConflict(String),

    #[error("{0}")]
    BusinessRule(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidParameters(_) => ErrorKind::InvalidParameters,
            Self::MalformedBody(_) => ErrorKind::MalformedBody,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DataConflict(_) => ErrorKind::DataConflict,
            Self::BusinessRule(_) => ErrorKind::BusinessRule,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule(message.into())
    }

    pub fn conflict(diagnostic: impl Into<String>) -> Self {
        Self::DataConflict(diagnostic.into())
    }

    pub fn internal(error: impl Into<anyhow::Error>) -> Self {
        Self::Internal(error.into())
    }
}

impl From<garde::Report> for AppError {
    fn from(report: garde::Report) -> Self {
        Self::Validation(Violation::from_report(&report))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidParameters(vec![Violation::new("query", rejection.body_text())])
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidParameters(vec![Violation::new("path", rejection.body_text())])
    }
}

/// Failure carried in response extensions until the translation middleware
/// rewrites the envelope with the real request path.
#[derive(Debug, Clone)]
pub struct PendingFailure(pub Arc<AppError>);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Path is unknown here; `translate_errors` fills it in.
        let (status, body) = translate(&self, "");
        let mut response = (status, axum::Json(body)).into_response();
        response
            .extensions_mut()
            .insert(PendingFailure(Arc::new(self)));
        response
    }
}
