//! Booking mock backend server.
//!
//! Wires configuration, Prometheus metrics and the HTTP router from
//! `booking-mock-web` into a runnable binary.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod config;
pub mod metrics;

pub use config::Config;

use axum::Router;
use booking_mock_web::{AppState, build_router};

/// Build the application router for the given configuration.
#[must_use]
pub fn build_app(config: &Config) -> Router {
    let state =
        AppState::default().with_session_cookie_max_age(config.synthetic.session_cookie_max_age);
    build_router(state, &config.router_options())
}
