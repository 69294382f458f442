//! Session creation and the global environment reset.

use crate::environment::{BookingStore, Clock, SessionIdGenerator};
use crate::event_log::EventLog;
use crate::types::{Session, SessionId, SessionSummary};
use std::sync::Arc;

/// Mints session ids and wipes the synthetic environment.
///
/// A session has no record beyond its bucket in the [`EventLog`]; creating
/// one just pre-creates that bucket.
pub struct SessionRegistry {
    log: Arc<EventLog>,
    bookings: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn SessionIdGenerator>,
}

impl SessionRegistry {
    /// Create a registry over `log`.
    #[must_use]
    pub fn new(
        log: Arc<EventLog>,
        bookings: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn SessionIdGenerator>,
    ) -> Self {
        Self {
            log,
            bookings,
            clock,
            ids,
        }
    }

    /// Create a fresh session with an empty bucket.
    ///
    /// `seed` is echoed back and does not influence the id.
    pub fn create(&self, seed: Option<String>) -> Session {
        let id = self.ids.next_id();
        let created_at = self.clock.now();

        if !self.log.open(&id, created_at) {
            // An id generator handed out a live id; the bucket is reused as-is.
            tracing::warn!(session_id = %id, "Session id already had a bucket");
        }
        tracing::debug!(session_id = %id, seed = ?seed, "Session created");

        Session {
            id,
            created_at,
            seed,
        }
    }

    /// Whether a bucket exists for `session_id`.
    #[must_use]
    pub fn exists(&self, session_id: &SessionId) -> bool {
        self.log.contains(session_id)
    }

    /// Overview of every live session.
    #[must_use]
    pub fn sessions(&self) -> Vec<SessionSummary> {
        self.log.summaries()
    }

    /// Wipe every session's log and the shared booking list.
    ///
    /// This is global: every caller's sessions are destroyed, not just the
    /// one that asked.
    pub fn reset(&self, seed: Option<&str>) {
        let removed = self.log.clear_all();
        self.bookings.clear_bookings();
        tracing::info!(sessions_removed = removed, seed = ?seed, "Synthetic environment reset");
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action_type::ActionType;
    use crate::environment::{SystemClock, UuidSessionIds};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBookings(AtomicUsize);

    impl BookingStore for CountingBookings {
        fn clear_bookings(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn registry() -> (SessionRegistry, Arc<EventLog>, Arc<CountingBookings>) {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let log = Arc::new(EventLog::new(clock.clone()));
        let bookings = Arc::new(CountingBookings::default());
        let registry = SessionRegistry::new(
            log.clone(),
            bookings.clone(),
            clock,
            Arc::new(UuidSessionIds),
        );
        (registry, log, bookings)
    }

    #[test]
    fn test_create_pre_creates_bucket() {
        let (registry, log, _) = registry();
        let session = registry.create(Some("42".to_string()));

        assert!(registry.exists(&session.id));
        assert!(log.get(&session.id).is_empty());
        assert_eq!(session.seed.as_deref(), Some("42"));
    }

    #[test]
    fn test_create_twice_gives_distinct_ids() {
        let (registry, _, _) = registry();
        assert_ne!(registry.create(None).id, registry.create(None).id);
    }

    #[test]
    fn test_reset_is_global() {
        let (registry, log, bookings) = registry();
        let a = registry.create(None);
        let b = registry.create(None);
        log.append(&a.id, ActionType::Click, json!({}));
        log.append(&b.id, ActionType::Click, json!({}));

        registry.reset(None);

        assert!(log.get_all().is_empty());
        assert!(!registry.exists(&a.id));
        assert!(!registry.exists(&b.id));
        assert!(registry.sessions().is_empty());
        assert_eq!(bookings.0.load(Ordering::SeqCst), 1);
    }
}
