//! Domain types for the synthetic telemetry subsystem.

use crate::action_type::ActionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Bucket used for events submitted without a session id.
pub const FALLBACK_SESSION: &str = "no_session";

/// Opaque session identifier.
///
/// Usually a UUID minted by the session registry, but any string a client
/// sends is accepted: logging to an unseen id creates its bucket.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a raw identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The fallback bucket for events without a session
    #[must_use]
    pub fn fallback() -> Self {
        Self(FALLBACK_SESSION.to_string())
    }

    /// Whether this is the fallback bucket
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_SESSION
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ============================================================================
// Sessions
// ============================================================================

/// A freshly created session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier
    pub id: SessionId,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Seed supplied by the caller, echoed back unchanged
    pub seed: Option<String>,
}

/// Overview of one session bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session identifier
    pub session_id: SessionId,
    /// When the bucket was created
    pub created_at: DateTime<Utc>,
    /// Number of events logged so far
    pub event_count: usize,
}

// ============================================================================
// Events
// ============================================================================

/// One recorded synthetic action.
///
/// Entries are immutable once appended. Each one carries its owning session
/// id, whichever way it is retrieved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    /// Owning session
    pub session_id: SessionId,
    /// Validated kind
    pub action_type: ActionType,
    /// Opaque payload
    pub payload: Value,
    /// Insertion time
    pub timestamp: DateTime<Utc>,
}

/// How global log retrieval lays out entries from different sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogOrder {
    /// Grouped by session, sessions in creation order
    #[default]
    Session,
    /// Interleaved in global insertion order
    Chronological,
}

/// Acknowledgement returned by reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetAck {
    /// Always `"ok"`
    pub status: String,
    /// Seed supplied by the caller
    pub seed: Option<String>,
}

/// Acknowledgement returned by a successful log-event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedAck {
    /// Always `"logged"`
    pub status: String,
}
