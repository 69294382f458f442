//! Router configuration for the booking mock backend.

use crate::error::AppError;
use crate::handlers::{bookings, health, synthetic};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Where the synthetic routes are mounted by default.
pub const DEFAULT_SYNTHETIC_PREFIX: &str = "/_synthetic";

/// Knobs for [`build_router`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Mount point of the synthetic routes (`""` or `"/"` for the root)
    pub synthetic_prefix: String,
    /// Allow any origin, method and header
    pub permissive_cors: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            synthetic_prefix: DEFAULT_SYNTHETIC_PREFIX.to_string(),
            permissive_cors: false,
        }
    }
}

/// The synthetic telemetry routes, unmounted.
pub fn synthetic_router() -> Router<AppState> {
    Router::new()
        .route("/reset", post(synthetic::reset))
        .route("/new_session", post(synthetic::new_session))
        .route("/log_event", post(synthetic::log_event))
        .route("/logs", get(synthetic::list_logs))
        .route("/sessions", get(synthetic::list_sessions))
}

/// Build the complete Axum router.
///
/// Configures:
/// - Health checks (`/health`, `/ready`)
/// - Bookings and the user profile (`/bookings`, `/users`)
/// - Synthetic telemetry under `options.synthetic_prefix`
/// - Request ids (`x-request-id`), request tracing and optional CORS
pub fn build_router(state: AppState, options: &RouterOptions) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/users", get(bookings::user_profile));

    let prefix = options.synthetic_prefix.trim_matches('/');
    let router = if prefix.is_empty() {
        router.merge(synthetic_router())
    } else {
        router.nest(&format!("/{prefix}"), synthetic_router())
    };

    let router = router
        .fallback(|| async { AppError::not_found() })
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

    let router = if options.permissive_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}
