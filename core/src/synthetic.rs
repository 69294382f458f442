//! The synthetic telemetry API: reset, new session, log event, list logs.
//!
//! HTTP handlers are thin adapters over [`SyntheticApi`]; everything the
//! endpoints promise is enforced here.
//!
//! ```text
//! session lifecycle:
//!
//!   non-existent ──create / first log──▶ active ──reset (all sessions)──▶ non-existent
//! ```

use crate::action_type::ActionType;
use crate::environment::{BookingStore, Clock, SessionIdGenerator};
use crate::error::Result;
use crate::event_log::EventLog;
use crate::session::SessionRegistry;
use crate::types::{
    EventLogEntry, LogOrder, LoggedAck, ResetAck, Session, SessionId, SessionSummary,
};
use serde_json::Value;
use std::sync::Arc;

/// Orchestrates the session registry, the action vocabulary and the event log.
pub struct SyntheticApi {
    log: Arc<EventLog>,
    sessions: SessionRegistry,
    bookings: Arc<dyn BookingStore>,
}

impl SyntheticApi {
    /// Wire up a fresh, empty synthetic environment.
    #[must_use]
    pub fn new(
        bookings: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn SessionIdGenerator>,
    ) -> Self {
        let log = Arc::new(EventLog::new(clock.clone()));
        let sessions = SessionRegistry::new(log.clone(), bookings.clone(), clock, ids);
        Self {
            log,
            sessions,
            bookings,
        }
    }

    /// The underlying event log.
    #[must_use]
    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    /// Wipe every session and every booking.
    pub fn reset(&self, seed: Option<String>) -> ResetAck {
        self.sessions.reset(seed.as_deref());
        metrics::counter!("synthetic_resets_total").increment(1);

        ResetAck {
            status: "ok".to_string(),
            seed,
        }
    }

    /// Start a new session.
    ///
    /// Also clears the shared booking list, even though bookings are not
    /// scoped to sessions: a new session starts from zero bookings.
    pub fn create_session(&self, seed: Option<String>) -> Session {
        let session = self.sessions.create(seed);
        self.bookings.clear_bookings();
        metrics::counter!("synthetic_sessions_created_total").increment(1);

        tracing::info!(session_id = %session.id, "New synthetic session");
        session
    }

    /// Validate and record one action event.
    ///
    /// Without a session id the event goes to the fallback bucket. Unknown
    /// session ids get a bucket on demand. Both succeed silently for the
    /// caller but are flagged in logs and metrics, since they usually mean
    /// the client lost track of its session.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::InvalidActionType`](crate::SyntheticError::InvalidActionType)
    /// if `action_type` is missing or not part of the vocabulary. Nothing is
    /// stored in that case.
    pub fn log_event(
        &self,
        session_id: Option<SessionId>,
        action_type: Option<&Value>,
        payload: Option<Value>,
    ) -> Result<LoggedAck> {
        let session_id = session_id.unwrap_or_else(SessionId::fallback);

        let action_type = ActionType::validate_json(action_type).inspect_err(|err| {
            metrics::counter!("synthetic_events_rejected_total").increment(1);
            tracing::debug!(session_id = %session_id, error = %err, "Rejected synthetic event");
        })?;

        let payload = payload.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        let appended = self.log.append_tracked(&session_id, action_type, payload);

        if session_id.is_fallback() {
            metrics::counter!("synthetic_fallback_events_total").increment(1);
            tracing::warn!(%action_type, "Event logged without a session id");
        } else if appended.bucket_created {
            metrics::counter!("synthetic_implicit_sessions_total").increment(1);
            tracing::warn!(
                session_id = %session_id,
                "Event logged to a session that was never created"
            );
        }
        metrics::counter!("synthetic_events_logged_total", "action_type" => action_type.as_str())
            .increment(1);

        Ok(LoggedAck {
            status: "logged".to_string(),
        })
    }

    /// Read back logged events.
    ///
    /// With a session id: that session's entries, or nothing if it is
    /// unknown. Without: every entry, laid out according to `order`.
    #[must_use]
    pub fn list_logs(
        &self,
        session_id: Option<&SessionId>,
        order: LogOrder,
    ) -> Vec<EventLogEntry> {
        match (session_id, order) {
            (Some(id), _) => self.log.get(id),
            (None, LogOrder::Session) => self.log.get_all(),
            (None, LogOrder::Chronological) => self.log.get_all_interleaved(),
        }
    }

    /// Overview of every live session in creation order.
    #[must_use]
    pub fn list_sessions(&self) -> Vec<SessionSummary> {
        self.sessions.sessions()
    }
}

impl std::fmt::Debug for SyntheticApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntheticApi")
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::action_type::ActionLabel;
    use crate::environment::{SystemClock, UuidSessionIds};
    use crate::error::SyntheticError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBookings(AtomicUsize);

    impl BookingStore for CountingBookings {
        fn clear_bookings(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn api() -> (SyntheticApi, Arc<CountingBookings>) {
        let bookings = Arc::new(CountingBookings::default());
        let api = SyntheticApi::new(
            bookings.clone(),
            Arc::new(SystemClock),
            Arc::new(UuidSessionIds),
        );
        (api, bookings)
    }

    #[test]
    fn test_log_then_list() {
        let (api, _) = api();
        let session = api.create_session(None);

        let ack = api
            .log_event(Some(session.id.clone()), Some(&json!("click")), Some(json!({"x": 1})))
            .unwrap();
        assert_eq!(ack.status, "logged");

        let logs = api.list_logs(Some(&session.id), LogOrder::Session);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].session_id, session.id);
        assert_eq!(logs[0].action_type, ActionType::Click);
        assert_eq!(logs[0].payload, json!({"x": 1}));
    }

    #[test]
    fn test_invalid_action_is_not_stored() {
        let (api, _) = api();
        let session = api.create_session(None);

        let err = api
            .log_event(Some(session.id.clone()), Some(&json!("bogus")), None)
            .unwrap_err();
        assert_eq!(
            err,
            SyntheticError::InvalidActionType(ActionLabel::Given("bogus".to_string()))
        );
        assert!(api.list_logs(Some(&session.id), LogOrder::Session).is_empty());
    }

    #[test]
    fn test_missing_session_goes_to_fallback() {
        let (api, _) = api();
        api.log_event(None, Some(&json!("scroll")), None).unwrap();

        let logs = api.list_logs(Some(&SessionId::fallback()), LogOrder::Session);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].payload, json!({}));
    }

    #[test]
    fn test_explicit_null_payload_is_kept() {
        let (api, _) = api();
        api.log_event(None, Some(&json!("click")), Some(Value::Null)).unwrap();

        let logs = api.list_logs(Some(&SessionId::fallback()), LogOrder::Session);
        assert_eq!(logs[0].payload, Value::Null);
    }

    #[test]
    fn test_unknown_session_gets_bucket() {
        let (api, _) = api();
        let stray = SessionId::new("never-created");
        api.log_event(Some(stray.clone()), Some(&json!("search")), Some(json!({"q": "a"})))
            .unwrap();

        assert_eq!(api.list_logs(Some(&stray), LogOrder::Session).len(), 1);
        assert_eq!(api.list_sessions()[0].session_id, stray);
    }

    #[test]
    fn test_reset_echoes_seed_and_clears_everything() {
        let (api, bookings) = api();
        let session = api.create_session(None);
        api.log_event(Some(session.id), Some(&json!("booking")), None).unwrap();
        api.log_event(None, Some(&json!("booking")), None).unwrap();

        let ack = api.reset(Some("7".to_string()));
        assert_eq!(ack.status, "ok");
        assert_eq!(ack.seed.as_deref(), Some("7"));
        assert!(api.list_logs(None, LogOrder::Session).is_empty());
        assert!(api.list_sessions().is_empty());
        // once for create_session, once for reset
        assert_eq!(bookings.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_create_session_clears_bookings() {
        let (api, bookings) = api();
        api.create_session(None);
        api.create_session(None);
        assert_eq!(bookings.0.load(Ordering::SeqCst), 2);
    }
}
