//! Repository for the `bookings` table.

use flightdesk_core::booking::BookingStatus;
use flightdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::booking::{Booking, BookingLock, NewBooking};

const COLUMNS: &str = "id, flight_id, passenger_name, seat_class, status, created_at";

pub struct BookingRepo;

impl BookingRepo {
    /// Lock a booking row, scoped to its flight.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        booking_id: DbId,
        flight_id: DbId,
    ) -> Result<Option<BookingLock>, sqlx::Error> {
        sqlx::query_as::<_, BookingLock>(
            "SELECT id, flight_id, status FROM bookings \
             WHERE id = $1 AND flight_id = $2 \
             FOR UPDATE",
        )
        .bind(booking_id)
        .bind(flight_id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Count CONFIRMED bookings on a flight. Only meaningful for the capacity
    /// check while the caller holds the flight row lock.
    pub async fn count_confirmed(conn: &mut PgConnection, flight_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE flight_id = $1 AND status = $2")
                .bind(flight_id)
                .bind(BookingStatus::Confirmed.as_db_str())
                .fetch_one(&mut *conn)
                .await?;
        Ok(count)
    }

    /// Insert a CONFIRMED booking, returning its ID.
    pub async fn insert(conn: &mut PgConnection, input: &NewBooking) -> Result<DbId, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO bookings (flight_id, passenger_name, seat_class, status, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(input.flight_id)
        .bind(&input.passenger_name)
        .bind(input.seat_class.as_db_str())
        .bind(BookingStatus::Confirmed.as_db_str())
        .bind(input.created_at)
        .fetch_one(&mut *conn)
        .await?;
        Ok(id)
    }

    /// Flip a booking to CANCELLED. Returns `true` if a row was updated.
    pub async fn mark_cancelled(conn: &mut PgConnection, booking_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE bookings SET status = $2 WHERE id = $1")
            .bind(booking_id)
            .bind(BookingStatus::Cancelled.as_db_str())
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every booking across all flights, ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings ORDER BY id ASC");
        sqlx::query_as::<_, Booking>(&query).fetch_all(pool).await
    }
}
