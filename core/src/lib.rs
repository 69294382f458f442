//! # Booking Mock Core
//!
//! Synthetic telemetry for the ticket-booking mock backend.
//!
//! Almost everything the mock backend serves is static catalog data. The
//! exception is the synthetic telemetry subsystem, which test harnesses use
//! to drive and observe a client session:
//!
//! - **Sessions**: opaque ids, each owning a bucket of events
//! - **Action events**: validated against a closed vocabulary
//!   ([`ActionType`]), stored append-only in an [`EventLog`]
//! - **Reset**: a global "factory reset" wiping every session and the
//!   shared booking list
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                  SyntheticApi                  │  ← reset / new session /
//! │                                                │    log event / list logs
//! ├───────────────┬─────────────────┬──────────────┤
//! │  ActionType   │ SessionRegistry │ BookingStore │  ← validation, lifecycle,
//! │  (closed set) │                 │  (external)  │    side effects
//! ├───────────────┴─────────────────┴──────────────┤
//! │           EventLog (single RwLock)             │  ← append-only buckets
//! └────────────────────────────────────────────────┘
//! ```
//!
//! All dependencies (clock, id generation, booking store) are injected as
//! traits from [`environment`]; nothing lives in a global.
//!
//! ## Example
//!
//! ```
//! use booking_mock_core::{
//!     BookingLedger, LogOrder, SyntheticApi,
//!     environment::{SystemClock, UuidSessionIds},
//! };
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let api = SyntheticApi::new(
//!     Arc::new(BookingLedger::new()),
//!     Arc::new(SystemClock),
//!     Arc::new(UuidSessionIds),
//! );
//!
//! let session = api.create_session(None);
//! api.log_event(Some(session.id.clone()), Some(&json!("click")), Some(json!({"x": 1})))?;
//!
//! let logs = api.list_logs(Some(&session.id), LogOrder::Session);
//! assert_eq!(logs.len(), 1);
//! # Ok::<(), booking_mock_core::SyntheticError>(())
//! ```

pub mod action_type;
pub mod bookings;
pub mod environment;
pub mod error;
pub mod event_log;
pub mod session;
pub mod synthetic;
pub mod types;

// Re-export commonly used types
pub use action_type::{ActionLabel, ActionType};
pub use bookings::{Booking, BookingLedger, UserProfile};
pub use error::SyntheticError;
pub use event_log::EventLog;
pub use session::SessionRegistry;
pub use synthetic::SyntheticApi;
pub use types::{
    EventLogEntry, FALLBACK_SESSION, LogOrder, LoggedAck, ResetAck, Session, SessionId,
    SessionSummary,
};
