//! Health check endpoints.
//!
//! These endpoints are used by load balancers and test harnesses to verify
//! the mock backend is up.

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Simple health check endpoint (for basic liveness).
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {"status": "ok", "version": "0.1.0"}
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Readiness check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,
    /// Live synthetic sessions
    pub sessions: usize,
    /// Logged synthetic events
    pub events: usize,
}

/// Readiness check with a snapshot of the synthetic store.
///
/// Everything is in memory, so the service is ready as soon as it answers.
///
/// # Endpoint
///
/// ```text
/// GET /ready
/// ```
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let log = state.synthetic.event_log();
    Json(ReadinessResponse {
        ready: true,
        sessions: log.summaries().len(),
        events: log.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, Json(body)) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_readiness_counts_sessions() {
        let state = AppState::default();
        state.synthetic.create_session(None);

        let Json(body) = readiness_check(State(state)).await;
        assert!(body.ready);
        assert_eq!(body.sessions, 1);
        assert_eq!(body.events, 0);
    }
}
