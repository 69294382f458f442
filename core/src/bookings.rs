//! In-memory booking list of the mock user.
//!
//! This is the collaborator that reset and session creation wipe through
//! [`BookingStore::clear_bookings`].

use crate::environment::BookingStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

/// A booking as submitted by the client, plus an id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// The client's own `id` if it sent one, otherwise a fresh UUID v4
    pub id: Value,
    /// Whatever the client sent, stored verbatim
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Profile of the single mock user, with their current bookings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Home city
    pub city: String,
    /// Bookings made so far
    pub bookings: Vec<Booking>,
}

/// Shared booking list.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: RwLock<Vec<Booking>>,
}

impl BookingLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a booking.
    ///
    /// A client-supplied `id` is kept as-is, whatever its type; only
    /// bookings without one get a generated UUID.
    pub fn create(&self, mut details: Map<String, Value>) -> Booking {
        let id = details
            .remove("id")
            .unwrap_or_else(|| Value::String(Uuid::new_v4().to_string()));
        let booking = Booking { id, details };

        self.bookings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(booking.clone());
        metrics::counter!("bookings_created_total").increment(1);
        tracing::debug!(booking_id = %booking.id, "Booking created");

        booking
    }

    /// Every booking in creation order.
    #[must_use]
    pub fn list(&self) -> Vec<Booking> {
        self.bookings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The mock user's profile.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: "user1".to_string(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: "+91 9876543210".to_string(),
            city: "Mumbai".to_string(),
            bookings: self.list(),
        }
    }
}

impl BookingStore for BookingLedger {
    fn clear_bookings(&self) {
        let mut bookings = self.bookings.write().unwrap_or_else(PoisonError::into_inner);
        let cleared = bookings.len();
        bookings.clear();
        tracing::debug!(cleared, "Bookings cleared");
    }
}
