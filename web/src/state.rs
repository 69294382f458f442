//! Application state for Axum handlers.
//!
//! Contains every shared resource the HTTP handlers need. It is cloned for
//! each request, cheaply, since everything sits behind an `Arc`.

use axum::extract::FromRef;
use booking_mock_core::environment::{Clock, SessionIdGenerator, SystemClock, UuidSessionIds};
use booking_mock_core::{BookingLedger, SyntheticApi};
use std::sync::Arc;

/// Default lifetime of the `session_id` cookie (24 hours).
pub const DEFAULT_SESSION_COOKIE_MAX_AGE: u64 = 60 * 60 * 24;

/// Application state shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Synthetic telemetry: sessions, action events, reset
    pub synthetic: Arc<SyntheticApi>,

    /// The mock user's booking list
    pub bookings: Arc<BookingLedger>,

    /// Max-Age of the `session_id` cookie, in seconds
    pub session_cookie_max_age: u64,
}

impl AppState {
    /// Create a new application state.
    ///
    /// `bookings` must be the same ledger `synthetic` clears on reset.
    #[must_use]
    pub fn new(synthetic: Arc<SyntheticApi>, bookings: Arc<BookingLedger>) -> Self {
        Self {
            synthetic,
            bookings,
            session_cookie_max_age: DEFAULT_SESSION_COOKIE_MAX_AGE,
        }
    }

    /// Wire a fresh state with the given clock and id source.
    #[must_use]
    pub fn with_environment(clock: Arc<dyn Clock>, ids: Arc<dyn SessionIdGenerator>) -> Self {
        let bookings = Arc::new(BookingLedger::new());
        let synthetic = Arc::new(SyntheticApi::new(bookings.clone(), clock, ids));
        Self::new(synthetic, bookings)
    }

    /// Override the session cookie lifetime.
    #[must_use]
    pub fn with_session_cookie_max_age(mut self, seconds: u64) -> Self {
        self.session_cookie_max_age = seconds;
        self
    }
}

impl Default for AppState {
    /// Production wiring: system clock and UUID session ids.
    fn default() -> Self {
        Self::with_environment(Arc::new(SystemClock), Arc::new(UuidSessionIds))
    }
}

impl FromRef<AppState> for Arc<SyntheticApi> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.synthetic.clone()
    }
}

impl FromRef<AppState> for Arc<BookingLedger> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.bookings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_mock_core::LogOrder;
    use booking_mock_core::environment::BookingStore;
    use serde_json::Map;

    #[test]
    fn test_state_is_clone() {
        // Ensure AppState implements Clone (required for Axum)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_default_shares_ledger_with_synthetic() {
        let state = AppState::default();
        state.bookings.create(Map::new());
        state.synthetic.reset(None);
        assert!(state.bookings.list().is_empty());
        assert!(state.synthetic.list_logs(None, LogOrder::Session).is_empty());

        // clearing twice is harmless
        state.bookings.clear_bookings();
        assert_eq!(state.session_cookie_max_age, DEFAULT_SESSION_COOKIE_MAX_AGE);
    }
}
