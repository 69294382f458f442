//! Axum HTTP surface for the booking mock backend.
//!
//! This crate is the imperative shell around `booking-mock-core`: it parses
//! requests, calls into [`SyntheticApi`](booking_mock_core::SyntheticApi) or
//! the booking ledger, and maps results to JSON responses.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract data** from the query string and JSON body
//! 3. **Call the core** through the shared [`AppState`]
//! 4. **Map result** to a JSON response, or an [`AppError`] with a
//!    `{"detail": ...}` body
//!
//! # Example
//!
//! ```ignore
//! use booking_mock_web::{AppState, RouterOptions, build_router};
//!
//! let app = build_router(AppState::default(), &RouterOptions::default());
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{ApiJson, ApiQuery};
pub use router::{DEFAULT_SYNTHETIC_PREFIX, RouterOptions, build_router, synthetic_router};
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
