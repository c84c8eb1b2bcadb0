use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::codes::canonical_name;

/// Wire format of `ErrorResponse::timestamp`
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Error envelope returned for every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Local time the error was produced (`dd-MM-yyyy HH:mm:ss`)
    #[serde(with = "timestamp_format")]
    #[schema(value_type = String, example = "19-10-2026 14:03:07")]
    pub timestamp: NaiveDateTime,
    /// HTTP status code
    #[schema(example = 404)]
    pub code: u16,
    /// Canonical name of `code`
    #[schema(example = "NOT_FOUND")]
    pub status: String,
    /// Failure category
    #[schema(example = "Não encontrado")]
    pub title: String,
    /// One line per cause, in the order reported
    pub errors: Vec<String>,
    /// Request path that produced the error
    #[schema(example = "/itens/42")]
    pub path: String,
}

impl ErrorResponse {
    /// Build a response stamped with the current time.
    ///
    /// A status the envelope cannot carry is reported as 500.
    pub fn of(
        status: StatusCode,
        title: impl Into<String>,
        errors: Vec<String>,
        path: impl Into<String>,
    ) -> Self {
        let (status, name) = match canonical_name(status) {
            Some(name) => (status, name),
            None => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        };

        Self {
            timestamp: Local::now().naive_local(),
            code: status.as_u16(),
            status: name.to_string(),
            title: title.into(),
            errors,
            path: path.into(),
        }
    }
}

/// Marks a response whose body already is an [`ErrorResponse`]
#[derive(Debug, Clone, Copy)]
pub struct Enveloped;

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, Json(self)).into_response();
        response.extensions_mut().insert(Enveloped);
        response
    }
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
