//! Synthetic telemetry endpoints.
//!
//! - POST /reset - Wipe every session and every booking
//! - POST /new_session - Start a session (also sets the `session_id` cookie)
//! - POST /log_event - Record one validated action event
//! - GET /logs - Read back events, for one session or all of them
//! - GET /sessions - Overview of live sessions
//!
//! The server mounts these under `/_synthetic`.

use crate::WebResult;
use crate::error::AppError;
use crate::extractors::{ApiJson, ApiQuery};
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use booking_mock_core::{EventLogEntry, LogOrder, LoggedAck, ResetAck, SessionId, SessionSummary};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session_id";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Optional seed for reproducible test scenarios.
#[derive(Debug, Default, Deserialize)]
pub struct SeedQuery {
    /// Echoed back; does not influence generated state
    pub seed: Option<String>,
}

/// Optional session selector.
#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    /// Target session; absent means the fallback bucket
    pub session_id: Option<String>,
}

/// Query parameters for reading logs.
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    /// Restrict to one session
    pub session_id: Option<String>,
    /// Layout of a global read
    #[serde(default)]
    pub order: LogOrder,
}

/// Body of a log-event request.
///
/// Both fields are optional on the wire; a missing `actionType` is rejected
/// during validation rather than by the JSON extractor, so the caller gets
/// the usual "Invalid action type" detail.
#[derive(Debug, Deserialize)]
pub struct LogEventRequest {
    /// Raw action label
    #[serde(rename = "actionType", default)]
    pub action_type: Option<Value>,
    /// Opaque payload. Only a missing key becomes `{}`; an explicit `null`
    /// is stored as `null`.
    #[serde(default = "empty_object")]
    pub payload: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Response after creating a session.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewSessionResponse {
    /// The new session's id
    pub session_id: SessionId,
}

// ============================================================================
// Handlers
// ============================================================================

/// Reset the synthetic environment.
///
/// # Example
///
/// ```bash
/// curl -X POST 'http://localhost:8000/_synthetic/reset?seed=42'
/// # {"status":"ok","seed":"42"}
/// ```
pub async fn reset(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SeedQuery>,
) -> Json<ResetAck> {
    Json(state.synthetic.reset(query.seed))
}

/// Start a new session.
///
/// The id is returned in the body and also set as a script-readable
/// `session_id` cookie so browser clients can pick it up.
///
/// # Example
///
/// ```bash
/// curl -i -X POST http://localhost:8000/_synthetic/new_session
/// # set-cookie: session_id=...; Max-Age=86400; Path=/; SameSite=Lax
/// # {"session_id":"..."}
/// ```
pub async fn new_session(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SeedQuery>,
) -> WebResult<Response> {
    let session = state.synthetic.create_session(query.seed);

    let cookie = format!(
        "{SESSION_COOKIE}={}; Max-Age={}; Path=/; SameSite=Lax",
        session.id, state.session_cookie_max_age
    );
    let cookie = HeaderValue::from_str(&cookie).map_err(|e| {
        AppError::internal("Session id is not a valid cookie value").with_source(e.into())
    })?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(NewSessionResponse {
            session_id: session.id,
        }),
    )
        .into_response())
}

/// Record one action event.
///
/// # Example
///
/// ```bash
/// curl -X POST 'http://localhost:8000/_synthetic/log_event?session_id=abc' \
///   -H "Content-Type: application/json" \
///   -d '{"actionType": "click", "payload": {"x": 1}}'
/// # {"status":"logged"}
/// ```
pub async fn log_event(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SessionQuery>,
    ApiJson(request): ApiJson<LogEventRequest>,
) -> WebResult<Json<LoggedAck>> {
    let ack = state.synthetic.log_event(
        query.session_id.map(SessionId::from),
        request.action_type.as_ref(),
        Some(request.payload),
    )?;
    Ok(Json(ack))
}

/// Read back logged events.
///
/// # Example
///
/// ```bash
/// curl 'http://localhost:8000/_synthetic/logs?session_id=abc'
/// curl 'http://localhost:8000/_synthetic/logs?order=chronological'
/// ```
pub async fn list_logs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LogsQuery>,
) -> Json<Vec<EventLogEntry>> {
    let session_id = query.session_id.map(SessionId::from);
    Json(state.synthetic.list_logs(session_id.as_ref(), query.order))
}

/// List live sessions with their event counts.
pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    Json(state.synthetic.list_sessions())
}
