//! Booking and user-profile endpoints.
//!
//! The booking list is the state that synthetic reset and new-session
//! clear; these routes let clients fill and inspect it.

use crate::extractors::ApiJson;
use crate::state::AppState;
use axum::{Json, extract::State};
use booking_mock_core::{Booking, UserProfile};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response after creating a booking.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    /// Always `"success"`
    pub status: String,
    /// The stored booking
    pub booking: Booking,
}

/// List the mock user's bookings.
pub async fn list_bookings(State(state): State<AppState>) -> Json<Vec<Booking>> {
    Json(state.bookings.list())
}

/// Create a booking from an arbitrary JSON object.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8000/bookings \
///   -H "Content-Type: application/json" \
///   -d '{"movieId": "1", "seats": ["A1", "A2"]}'
/// ```
pub async fn create_booking(
    State(state): State<AppState>,
    ApiJson(details): ApiJson<Map<String, Value>>,
) -> Json<CreateBookingResponse> {
    let booking = state.bookings.create(details);
    Json(CreateBookingResponse {
        status: "success".to_string(),
        booking,
    })
}

/// Profile of the mock user, bookings included.
pub async fn user_profile(State(state): State<AppState>) -> Json<UserProfile> {
    Json(state.bookings.profile())
}
