//! Booking transaction manager.
//!
//! Creates and cancels bookings under row locks so the capacity and
//! departure rules hold with any number of concurrent requests:
//!
//! - `create_booking` locks the flight row, then counts and inserts.
//!   Concurrent bookers of one flight are totally ordered by that lock.
//! - `cancel_booking` locks the booking row, then its flight row.
//!   `create_booking` never locks booking rows, so the two cannot deadlock.
//!
//! "Now" is captured once per call and reused for every departure check.

use chrono::Utc;
use flightdesk_core::booking::{
    normalize_passenger_name, BookingStatus, SeatClass, MSG_BOOKING_NOT_FOUND, MSG_BOOK_DEPARTED,
    MSG_CANCEL_DEPARTED, MSG_FLIGHT_UNAVAILABLE, MSG_SOLD_OUT,
};
use flightdesk_core::error::CoreError;
use flightdesk_core::flight::{has_departed, is_sold_out};
use flightdesk_core::types::{DbId, Timestamp};

use crate::error::DbError;
use crate::models::booking::{
    BookingView, CancelBookingResponse, CreateBookingResponse, NewBooking,
};
use crate::repositories::{BookingRepo, FlightRepo};
use crate::tx::with_transaction;
use crate::DbPool;

/// Owns the pool it was constructed with; cheap to clone.
#[derive(Clone)]
pub struct BookingService {
    pool: DbPool,
}

impl BookingService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Book a seat on a flight, evaluated against the current time.
    pub async fn create_booking(
        &self,
        flight_id: DbId,
        passenger_name: &str,
        seat_class: &str,
    ) -> Result<CreateBookingResponse, DbError> {
        self.create_booking_at(flight_id, passenger_name, seat_class, Utc::now())
            .await
    }

    /// Book a seat on a flight as of `now`.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` if the flight does not exist.
    /// - `CoreError::InvalidState` if the flight departed at or before `now`.
    /// - `CoreError::CapacityExceeded` if confirmed bookings fill the flight.
    /// - `CoreError::Validation` for an unknown seat class or bad name.
    pub async fn create_booking_at(
        &self,
        flight_id: DbId,
        passenger_name: &str,
        seat_class: &str,
        now: Timestamp,
    ) -> Result<CreateBookingResponse, DbError> {
        let passenger_name = passenger_name.to_string();
        let seat_class = seat_class.to_string();

        let result = with_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                let flight = FlightRepo::lock_for_update(conn, flight_id)
                    .await?
                    .ok_or_else(|| CoreError::NotFound(MSG_FLIGHT_UNAVAILABLE.into()))?;

                if has_departed(flight.departure_time, now) {
                    return Err(CoreError::InvalidState(MSG_BOOK_DEPARTED.into()).into());
                }

                if flight.capacity > 0 {
                    let confirmed = BookingRepo::count_confirmed(conn, flight.id).await?;
                    if is_sold_out(flight.capacity, confirmed) {
                        return Err(CoreError::CapacityExceeded(MSG_SOLD_OUT.into()).into());
                    }
                }

                let new_booking = NewBooking {
                    flight_id: flight.id,
                    passenger_name: normalize_passenger_name(&passenger_name)?,
                    seat_class: SeatClass::normalize(&seat_class)?,
                    created_at: now,
                };
                let booking_id = BookingRepo::insert(conn, &new_booking).await?;

                Ok::<_, DbError>(CreateBookingResponse::confirmed(booking_id))
            })
        })
        .await;

        match &result {
            Ok(created) => tracing::info!(
                flight_id,
                booking_id = created.booking_id,
                "Booking confirmed"
            ),
            Err(DbError::Core(err)) => {
                tracing::warn!(flight_id, error = %err, "Booking rejected")
            }
            Err(DbError::Database(err)) => {
                tracing::error!(flight_id, error = %err, "Booking failed")
            }
        }
        result
    }

    /// Cancel a booking, evaluated against the current time.
    pub async fn cancel_booking(
        &self,
        flight_id: DbId,
        booking_id: DbId,
    ) -> Result<CancelBookingResponse, DbError> {
        self.cancel_booking_at(flight_id, booking_id, Utc::now())
            .await
    }

    /// Cancel a booking as of `now`. Cancelling an already cancelled booking
    /// succeeds without writing.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` if no booking with this ID belongs to the flight.
    /// - `CoreError::InvalidState` if the flight departed at or before `now`.
    pub async fn cancel_booking_at(
        &self,
        flight_id: DbId,
        booking_id: DbId,
        now: Timestamp,
    ) -> Result<CancelBookingResponse, DbError> {
        let result = with_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                let booking = BookingRepo::lock_for_update(conn, booking_id, flight_id)
                    .await?
                    .ok_or_else(|| CoreError::NotFound(MSG_BOOKING_NOT_FOUND.into()))?;

                // The foreign key guarantees the flight exists while the booking does.
                let flight = FlightRepo::lock_for_update(conn, booking.flight_id)
                    .await?
                    .ok_or_else(|| CoreError::NotFound(MSG_BOOKING_NOT_FOUND.into()))?;

                if has_departed(flight.departure_time, now) {
                    return Err(CoreError::InvalidState(MSG_CANCEL_DEPARTED.into()).into());
                }

                match booking.status.parse::<BookingStatus>()? {
                    BookingStatus::Cancelled => Ok::<_, DbError>(false),
                    BookingStatus::Confirmed => {
                        if !BookingRepo::mark_cancelled(conn, booking.id).await? {
                            return Err(CoreError::Internal(format!(
                                "locked booking {} was not updated",
                                booking.id
                            ))
                            .into());
                        }
                        Ok(true)
                    }
                }
            })
        })
        .await;

        match result {
            Ok(changed) => {
                tracing::info!(flight_id, booking_id, changed, "Booking cancelled");
                Ok(CancelBookingResponse::canceled())
            }
            Err(err) => {
                match &err {
                    DbError::Core(core) => {
                        tracing::warn!(flight_id, booking_id, error = %core, "Cancellation rejected")
                    }
                    DbError::Database(db) => {
                        tracing::error!(flight_id, booking_id, error = %db, "Cancellation failed")
                    }
                }
                Err(err)
            }
        }
    }

    /// All bookings ordered by ID, rendered for display. No locks taken.
    pub async fn list_bookings(&self) -> Result<Vec<BookingView>, sqlx::Error> {
        let rows = BookingRepo::list(&self.pool).await?;
        Ok(rows.into_iter().map(BookingView::from).collect())
    }
}
