//! Error types for web handlers.
//!
//! This module bridges domain errors and HTTP responses by implementing
//! Axum's `IntoResponse` trait. Error bodies use the `{"detail": ...}` shape
//! the booking frontend already understands.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use booking_mock_core::SyntheticError;
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler(State(state): State<AppState>) -> Result<Json<LoggedAck>, AppError> {
///     let ack = state.synthetic.log_event(None, Some(&label), None)?;
///     Ok(Json(ack))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    detail: String,
    /// Error code (for logs)
    code: &'static str,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub fn new(status: StatusCode, detail: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            detail: detail.into(),
            code,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail, "BAD_REQUEST")
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", "NOT_FOUND")
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            detail,
            "INTERNAL_SERVER_ERROR",
        )
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.detail)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Human-readable error message.
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    code = self.code,
                    detail = %self.detail,
                    error = %source,
                    "Internal server error"
                ),
                None => tracing::error!(
                    status = %self.status,
                    code = self.code,
                    detail = %self.detail,
                    "Internal server error"
                ),
            }
        } else {
            tracing::debug!(
                status = %self.status,
                code = self.code,
                detail = %self.detail,
                "Client error"
            );
        }

        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

/// Every synthetic failure is the caller's fault.
impl From<SyntheticError> for AppError {
    fn from(err: SyntheticError) -> Self {
        match err {
            SyntheticError::InvalidActionType(_) => Self::bad_request(err.to_string()),
        }
    }
}

/// Malformed query strings keep axum's status and message.
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text(), "INVALID_QUERY")
    }
}

/// Malformed bodies keep axum's status and message.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text(), "INVALID_BODY")
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}
