//! Booking entity model and response views.

use serde::Serialize;
use sqlx::FromRow;
use flightdesk_core::booking::{
    capitalize, BookingStatus, SeatClass, MSG_BOOKING_CANCELED, MSG_BOOKING_CONFIRMED,
};
use flightdesk_core::types::{DbId, Timestamp};

/// A booking row from the `bookings` table.
///
/// `seat_class` and `status` hold the persisted UPPERCASE form.
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: DbId,
    pub flight_id: DbId,
    pub passenger_name: String,
    pub seat_class: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// The columns the cancellation flow reads while holding the booking row lock.
#[derive(Debug, Clone, FromRow)]
pub struct BookingLock {
    pub id: DbId,
    pub flight_id: DbId,
    pub status: String,
}

/// Validated input for inserting a booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub flight_id: DbId,
    pub passenger_name: String,
    pub seat_class: SeatClass,
    pub created_at: Timestamp,
}

/// Listing projection with human-readable seat class and status.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub booking_id: DbId,
    pub flight_id: DbId,
    pub passenger_name: String,
    pub seat_class: String,
    pub status: String,
    pub created_at: Timestamp,
}

impl From<Booking> for BookingView {
    fn from(row: Booking) -> Self {
        let seat_class = row
            .seat_class
            .parse::<SeatClass>()
            .map(|c| c.label().to_string())
            .unwrap_or_else(|_| capitalize(&row.seat_class));
        let status = row
            .status
            .parse::<BookingStatus>()
            .map(|s| s.label().to_string())
            .unwrap_or_else(|_| capitalize(&row.status));

        Self {
            booking_id: row.id,
            flight_id: row.flight_id,
            passenger_name: row.passenger_name,
            seat_class,
            status,
            created_at: row.created_at,
        }
    }
}

/// Result of a successful `CreateBooking`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub booking_id: DbId,
    pub status: &'static str,
}

impl CreateBookingResponse {
    pub fn confirmed(booking_id: DbId) -> Self {
        Self {
            booking_id,
            status: MSG_BOOKING_CONFIRMED,
        }
    }
}

/// Result of a successful `CancelBooking`, including the idempotent repeat.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CancelBookingResponse {
    pub message: &'static str,
}

impl CancelBookingResponse {
    pub fn canceled() -> Self {
        Self {
            message: MSG_BOOKING_CANCELED,
        }
    }
}
