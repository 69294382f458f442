//! Custom Axum extractors.
//!
//! Drop-in replacements for `Query` and `Json` whose rejections go through
//! [`AppError`], so a bad query string or body gets the same
//! `{"detail": ...}` JSON as every other client error instead of axum's
//! plain-text message.
//!
//! # Examples
//!
//! ```ignore
//! use booking_mock_web::extractors::{ApiJson, ApiQuery};
//!
//! async fn handler(
//!     ApiQuery(query): ApiQuery<LogsQuery>,
//!     ApiJson(body): ApiJson<LogEventRequest>,
//! ) -> Result<Json<LoggedAck>, AppError> {
//!     // ...
//! }
//! ```

use crate::error::AppError;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Query string deserialized into `T`.
///
/// Rejects with a 400 `{"detail": ...}` when a parameter is missing or has
/// the wrong shape (for example an unknown `order` value).
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// JSON body deserialized into `T`.
///
/// Keeps axum's status codes (400 for syntax errors, 415 for a missing
/// content type, 422 for a body of the wrong shape) but renders them as
/// `{"detail": ...}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
