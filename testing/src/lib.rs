//! # Booking Mock Testing
//!
//! Testing utilities for the booking mock backend.
//!
//! This crate provides:
//! - Deterministic implementations of the core environment traits
//! - A ready-wired [`SyntheticApi`] harness
//! - proptest strategies for action labels and payloads
//!
//! ## Example
//!
//! ```
//! use booking_mock_testing::helpers::TestHarness;
//! use booking_mock_core::LogOrder;
//! use serde_json::json;
//!
//! let harness = TestHarness::new();
//! let session = harness.api.create_session(None);
//! assert_eq!(session.id.as_str(), "session-1");
//!
//! harness.api.log_event(Some(session.id.clone()), Some(&json!("click")), None)?;
//! assert_eq!(harness.api.list_logs(None, LogOrder::Session).len(), 1);
//! # Ok::<(), booking_mock_core::SyntheticError>(())
//! ```

use booking_mock_core::environment::{BookingStore, Clock, SessionIdGenerator};
use booking_mock_core::{SessionId, SyntheticApi};
use chrono::{DateTime, Duration, Utc};

/// Mock implementations of the environment traits.
pub mod mocks {
    use super::{BookingStore, Clock, DateTime, Duration, SessionId, SessionIdGenerator, Utc};
    use std::sync::Mutex;
    use std::sync::PoisonError;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use booking_mock_testing::mocks::FixedClock;
    /// use booking_mock_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Clock that moves forward one second on every reading.
    ///
    /// Useful when a test needs distinct, predictable timestamps.
    #[derive(Debug)]
    pub struct SteppingClock {
        start: DateTime<Utc>,
        ticks: AtomicU64,
    }

    impl SteppingClock {
        /// Start ticking from `start`
        #[must_use]
        pub const fn new(start: DateTime<Utc>) -> Self {
            Self {
                start,
                ticks: AtomicU64::new(0),
            }
        }
    }

    impl Clock for SteppingClock {
        #[allow(clippy::cast_possible_wrap)]
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
            self.start + Duration::seconds(tick as i64)
        }
    }

    /// Predictable session ids: `session-1`, `session-2`, ...
    #[derive(Debug, Default)]
    pub struct SequentialSessionIds {
        next: AtomicU64,
    }

    impl SequentialSessionIds {
        /// Start counting at 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(0),
            }
        }
    }

    impl SessionIdGenerator for SequentialSessionIds {
        fn next_id(&self) -> SessionId {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            SessionId::new(format!("session-{n}"))
        }
    }

    /// Booking collaborator that only records how often it was cleared.
    #[derive(Debug, Default)]
    pub struct RecordingBookings {
        clears: AtomicUsize,
        pending: Mutex<Vec<String>>,
    }

    impl RecordingBookings {
        /// Create with no bookings and no clears
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Pretend a booking was made
        pub fn book(&self, reference: impl Into<String>) {
            self.pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(reference.into());
        }

        /// Bookings made since the last clear
        #[must_use]
        pub fn bookings(&self) -> Vec<String> {
            self.pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Number of `clear_bookings` calls so far
        #[must_use]
        pub fn clear_count(&self) -> usize {
            self.clears.load(Ordering::SeqCst)
        }
    }

    impl BookingStore for RecordingBookings {
        fn clear_bookings(&self) {
            self.pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
            self.clears.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use super::SyntheticApi;
    use super::mocks::{RecordingBookings, SequentialSessionIds, test_clock};
    use std::sync::Arc;

    /// A [`SyntheticApi`] wired to deterministic doubles.
    ///
    /// Every entry is stamped with the fixed [`test_clock`] time and session
    /// ids come out as `session-1`, `session-2`, ...
    #[derive(Debug)]
    pub struct TestHarness {
        /// The API under test
        pub api: Arc<SyntheticApi>,
        /// The booking collaborator it clears
        pub bookings: Arc<RecordingBookings>,
    }

    impl TestHarness {
        /// Build a fresh harness
        #[must_use]
        pub fn new() -> Self {
            let bookings = Arc::new(RecordingBookings::new());
            let api = SyntheticApi::new(
                bookings.clone(),
                Arc::new(test_clock()),
                Arc::new(SequentialSessionIds::new()),
            );
            Self {
                api: Arc::new(api),
                bookings,
            }
        }
    }

    impl Default for TestHarness {
        fn default() -> Self {
            Self::new()
        }
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use booking_mock_core::ActionType;
    use proptest::prelude::*;
    use serde_json::{Value, json};

    /// Any label from the closed action vocabulary.
    pub fn valid_action_label() -> impl Strategy<Value = &'static str> {
        proptest::sample::select(ActionType::ALL.map(ActionType::as_str).to_vec())
    }

    /// Non-empty labels that are not part of the vocabulary.
    pub fn invalid_action_label() -> impl Strategy<Value = String> {
        "[A-Za-z_ ]{1,16}".prop_filter("must not be a known action type", |label| {
            label.parse::<ActionType>().is_err()
        })
    }

    /// Small JSON payloads of mixed shapes.
    pub fn payload() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(json!({})),
            any::<i64>().prop_map(|n| json!({ "n": n })),
            "[a-z]{0,8}".prop_map(|s| json!({ "s": s })),
            proptest::collection::vec(any::<bool>(), 0..4).prop_map(|v| json!({ "flags": v })),
        ]
    }
}

// Re-export commonly used items
pub use helpers::TestHarness;
pub use mocks::{FixedClock, RecordingBookings, SequentialSessionIds, SteppingClock, test_clock};
