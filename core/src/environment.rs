//! Dependency injection traits.
//!
//! Everything the synthetic subsystem needs from the outside world (time,
//! identifiers, the booking collaborator) is abstracted behind a trait and
//! handed in at construction time. Tests swap in the deterministic doubles
//! from `booking-mock-testing`.

use crate::types::SessionId;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```
/// use booking_mock_core::environment::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let before = clock.now();
/// assert!(clock.now() >= before);
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of fresh session identifiers.
///
/// Implementations must never hand out the same identifier twice for the
/// lifetime of the process.
pub trait SessionIdGenerator: Send + Sync {
    /// Produce a new, unused session identifier
    fn next_id(&self) -> SessionId;
}

/// Production generator: random UUID v4 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSessionIds;

impl SessionIdGenerator for UuidSessionIds {
    fn next_id(&self) -> SessionId {
        SessionId::new(Uuid::new_v4().to_string())
    }
}

/// The booking collaborator as seen from the synthetic subsystem.
///
/// Reset and session creation both wipe the shared booking list; that is
/// the only interaction.
pub trait BookingStore: Send + Sync {
    /// Remove every booking. Idempotent.
    fn clear_bookings(&self);
}
