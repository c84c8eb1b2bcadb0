use axum::http::StatusCode;
use std::fmt;

/// Failure kinds distinguished by the error envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request body failed field validation
    Validation,

    /// Query parameters or path variables violated a constraint
    InvalidParameters,

    /// Request body could not be read or deserialized
    MalformedBody,

    /// Requested resource does not exist
    NotFound,

    /// Uniqueness or foreign-key constraint violated
    DataConflict,

    /// Domain rule rejected the operation
    BusinessRule,

    /// Anything else
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION_ERROR"),
            Self::InvalidParameters => write!(f, "INVALID_PARAMETERS"),
            Self::MalformedBody => write!(f, "MALFORMED_BODY"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::DataConflict => write!(f, "DATA_CONFLICT"),
            Self::BusinessRule => write!(f, "BUSINESS_RULE"),
            Self::Internal => write!(f, "INTERNAL_ERROR"),
        }
    }
}

impl ErrorKind {
    /// HTTP status code for this kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation | Self::InvalidParameters | Self::MalformedBody => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::DataConflict => StatusCode::CONFLICT,
            Self::BusinessRule => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label shown to the client in `title`
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation => "Erro de validação",
            Self::InvalidParameters => "Parâmetros inválidos",
            Self::MalformedBody => "Corpo da requisição inválido",
            Self::NotFound => "Não encontrado",
            Self::DataConflict => "Conflito de dados",
            Self::BusinessRule => "Regra de negócio violada",
            Self::Internal => "Erro interno",
        }
    }
}

/// Canonical name of a status code, e.g. `404` -> `NOT_FOUND`.
///
/// Codes outside the failure table report the 500 name.
pub fn status_name(status: StatusCode) -> &'static str {
    canonical_name(status).unwrap_or("INTERNAL_SERVER_ERROR")
}

/// Name of `status` if it is one the error envelope may carry
pub(crate) fn canonical_name(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some("BAD_REQUEST"),
        StatusCode::NOT_FOUND => Some("NOT_FOUND"),
        StatusCode::CONFLICT => Some("CONFLICT"),
        StatusCode::UNPROCESSABLE_ENTITY => Some("UNPROCESSABLE_ENTITY"),
        StatusCode::INTERNAL_SERVER_ERROR => Some("INTERNAL_SERVER_ERROR"),
        _ => None,
    }
}
