//! Extractors that validate their payload with [`garde`] before the handler
//! runs.
//!
//! Body failures surface as [`AppError::Validation`]; query and path
//! failures as [`AppError::InvalidParameters`]. Violations keep the order
//! garde reports them in, which is field declaration order.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use garde::Validate;
use serde::de::DeserializeOwned;

use crate::errors::{AppError, Violation};

/// JSON body, deserialized and validated
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

/// Query string, deserialized and validated
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

/// Path variables, deserialized and validated
#[derive(Debug, Clone)]
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        check_parameters(value).map(Self)
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        check_parameters(value).map(Self)
    }
}

fn check_parameters<T>(value: T) -> Result<T, AppError>
where
    T: Validate,
    T::Context: Default,
{
    match value.validate() {
        Ok(()) => Ok(value),
        Err(report) => Err(AppError::InvalidParameters(Violation::from_report(&report))),
    }
}
