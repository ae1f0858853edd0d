//! Integration tests for the booking transaction manager.
//!
//! Exercises create/cancel/list against a real database, including the
//! capacity rule under concurrent booking attempts.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use flightdesk_core::error::CoreError;
use flightdesk_core::types::{DbId, Timestamp};
use flightdesk_db::models::flight::CreateFlight;
use flightdesk_db::repositories::{BookingRepo, FlightRepo};
use flightdesk_db::{BookingService, DbError};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_flight(pool: &PgPool, number: &str, departure: Timestamp, capacity: i32) -> DbId {
    let input = CreateFlight {
        flight_number: number.to_string(),
        origin: "JFK".to_string(),
        destination: "LAX".to_string(),
        departure_time: departure,
        arrival_time: departure + Duration::hours(6),
        capacity: Some(capacity),
    };
    FlightRepo::create(pool, &input).await.unwrap().id
}

async fn future_flight(pool: &PgPool, number: &str, capacity: i32) -> DbId {
    seed_flight(pool, number, Utc::now() + Duration::days(1), capacity).await
}

async fn confirmed_count(pool: &PgPool, flight_id: DbId) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM bookings WHERE flight_id = $1 AND status = 'CONFIRMED'",
    )
    .bind(flight_id)
    .fetch_one(pool)
    .await
    .unwrap();
    count
}

async fn row_version(pool: &PgPool, booking_id: DbId) -> i64 {
    let (xmin,): (i64,) = sqlx::query_as("SELECT xmin::text::bigint FROM bookings WHERE id = $1")
        .bind(booking_id)
        .fetch_one(pool)
        .await
        .unwrap();
    xmin
}

async fn booking_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

// ---------------------------------------------------------------------------
// CreateBooking
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_confirms_and_persists_uppercase_seat_class(pool: PgPool) {
    let flight_id = future_flight(&pool, "FD100", 2).await;
    let service = BookingService::new(pool.clone());

    let created = service
        .create_booking(flight_id, "  John Doe ", "economy")
        .await
        .unwrap();
    assert_eq!(created.status, "Booking confirmed.");

    let row = BookingRepo::find_by_id(&pool, created.booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.flight_id, flight_id);
    assert_eq!(row.passenger_name, "John Doe");
    assert_eq!(row.seat_class, "ECONOMY");
    assert_eq!(row.status, "CONFIRMED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn third_booking_on_two_seat_flight_is_sold_out(pool: PgPool) {
    let flight_id = future_flight(&pool, "FD101", 2).await;
    let service = BookingService::new(pool.clone());

    service.create_booking(flight_id, "A", "ECONOMY").await.unwrap();
    service.create_booking(flight_id, "B", "BUSINESS").await.unwrap();

    let err = service
        .create_booking(flight_id, "C", "FIRST")
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::CapacityExceeded(msg)) if msg == "flight is sold out");
    assert_eq!(confirmed_count(&pool, flight_id).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancelled_bookings_free_capacity(pool: PgPool) {
    let flight_id = future_flight(&pool, "FD102", 1).await;
    let service = BookingService::new(pool.clone());

    let first = service.create_booking(flight_id, "A", "ECONOMY").await.unwrap();
    service.cancel_booking(flight_id, first.booking_id).await.unwrap();

    assert!(service.create_booking(flight_id, "B", "ECONOMY").await.is_ok());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn zero_capacity_is_unlimited(pool: PgPool) {
    let flight_id = future_flight(&pool, "FD103", 0).await;
    let service = BookingService::new(pool.clone());

    for i in 0..5 {
        service
            .create_booking(flight_id, &format!("Passenger {i}"), "ECONOMY")
            .await
            .unwrap();
    }
    assert_eq!(confirmed_count(&pool, flight_id).await, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_missing_flight_is_not_found(pool: PgPool) {
    let service = BookingService::new(pool);

    let err = service
        .create_booking(999_999, "John Doe", "ECONOMY")
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound(msg)) if msg == "flight/seat unavailable");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_departed_flight_is_invalid_state_regardless_of_capacity(pool: PgPool) {
    let unlimited = seed_flight(&pool, "FD104", Utc::now() - Duration::hours(1), 0).await;
    let roomy = seed_flight(&pool, "FD105", Utc::now() - Duration::hours(1), 100).await;
    let service = BookingService::new(pool.clone());

    for flight_id in [unlimited, roomy] {
        let err = service
            .create_booking(flight_id, "Late Larry", "ECONOMY")
            .await
            .unwrap_err();
        assert_matches!(
            err,
            DbError::Core(CoreError::InvalidState(msg)) if msg == "cannot book a departed flight"
        );
    }
    assert_eq!(booking_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn departure_at_the_captured_instant_counts_as_departed(pool: PgPool) {
    let departure = Utc::now() + Duration::hours(2);
    let flight_id = seed_flight(&pool, "FD106", departure, 0).await;
    let service = BookingService::new(pool);

    let err = service
        .create_booking_at(flight_id, "Edge Case", "ECONOMY", departure)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidState(_)));

    let ok = service
        .create_booking_at(flight_id, "Edge Case", "ECONOMY", departure - Duration::seconds(1))
        .await;
    assert!(ok.is_ok());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_seat_class_rolls_back_without_insert(pool: PgPool) {
    let flight_id = future_flight(&pool, "FD107", 2).await;
    let service = BookingService::new(pool.clone());

    let err = service
        .create_booking(flight_id, "John Doe", "premium")
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
    assert_eq!(booking_count(&pool).await, 0);

    // The flight row lock was released by the rollback.
    assert!(service.create_booking(flight_id, "John Doe", "first").await.is_ok());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_bookings_never_exceed_capacity(pool: PgPool) {
    let flight_id = future_flight(&pool, "FD108", 3).await;
    let service = BookingService::new(pool.clone());

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_booking(flight_id, &format!("Racer {i}"), "ECONOMY")
                    .await
            })
        })
        .collect();

    let mut confirmed = 0;
    let mut sold_out = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => confirmed += 1,
            Err(DbError::Core(CoreError::CapacityExceeded(_))) => sold_out += 1,
            Err(other) => panic!("unexpected booking error: {other}"),
        }
    }

    assert_eq!(confirmed, 3);
    assert_eq!(sold_out, 9);
    assert_eq!(confirmed_count(&pool, flight_id).await, 3);
}

// ---------------------------------------------------------------------------
// CancelBooking
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancel_flips_status_and_repeat_is_idempotent(pool: PgPool) {
    let flight_id = future_flight(&pool, "FD200", 2).await;
    let service = BookingService::new(pool.clone());
    let created = service
        .create_booking(flight_id, "John Doe", "ECONOMY")
        .await
        .unwrap();

    let first = service
        .cancel_booking(flight_id, created.booking_id)
        .await
        .unwrap();
    assert_eq!(first.message, "Booking canceled successfully.");

    let row = BookingRepo::find_by_id(&pool, created.booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, "CANCELLED");
    let version = row_version(&pool, created.booking_id).await;

    let second = service
        .cancel_booking(flight_id, created.booking_id)
        .await
        .unwrap();
    assert_eq!(second, first);

    let after = BookingRepo::find_by_id(&pool, created.booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.status, "CANCELLED");
    assert_eq!(after.created_at, row.created_at);
    assert_eq!(row_version(&pool, created.booking_id).await, version);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_cancelled_reports_whether_a_row_changed(pool: PgPool) {
    let flight_id = future_flight(&pool, "FD204", 0).await;
    let service = BookingService::new(pool.clone());
    let created = service
        .create_booking(flight_id, "John Doe", "ECONOMY")
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    assert!(BookingRepo::mark_cancelled(&mut conn, created.booking_id)
        .await
        .unwrap());
    assert!(!BookingRepo::mark_cancelled(&mut conn, 999_999).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancel_with_wrong_flight_is_not_found(pool: PgPool) {
    let flight_a = future_flight(&pool, "FD201", 0).await;
    let flight_b = future_flight(&pool, "FD202", 0).await;
    let service = BookingService::new(pool.clone());
    let created = service
        .create_booking(flight_a, "John Doe", "ECONOMY")
        .await
        .unwrap();

    let err = service
        .cancel_booking(flight_b, created.booking_id)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound(msg)) if msg == "booking not found for this flight"
    );

    let err = service.cancel_booking(flight_a, 999_999).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancel_after_departure_is_invalid_state(pool: PgPool) {
    let departure = Utc::now() + Duration::hours(3);
    let flight_id = seed_flight(&pool, "FD203", departure, 0).await;
    let service = BookingService::new(pool.clone());
    let created = service
        .create_booking(flight_id, "John Doe", "BUSINESS")
        .await
        .unwrap();

    let err = service
        .cancel_booking_at(flight_id, created.booking_id, departure + Duration::minutes(5))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::InvalidState(msg)) if msg == "cannot cancel after departure"
    );

    let row = BookingRepo::find_by_id(&pool, created.booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, "CONFIRMED");
}

// ---------------------------------------------------------------------------
// ListBookings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_renders_capitalized_values_in_id_order(pool: PgPool) {
    let flight_id = future_flight(&pool, "FD300", 0).await;
    let service = BookingService::new(pool.clone());

    let first = service
        .create_booking(flight_id, "Ada", "economy")
        .await
        .unwrap();
    let second = service
        .create_booking(flight_id, "Grace", "FIRST")
        .await
        .unwrap();
    service
        .cancel_booking(flight_id, second.booking_id)
        .await
        .unwrap();

    let views = service.list_bookings().await.unwrap();
    assert_eq!(views.len(), 2);

    assert_eq!(views[0].booking_id, first.booking_id);
    assert_eq!(views[0].seat_class, "Economy");
    assert_eq!(views[0].status, "Confirmed");

    assert_eq!(views[1].booking_id, second.booking_id);
    assert_eq!(views[1].passenger_name, "Grace");
    assert_eq!(views[1].seat_class, "First");
    assert_eq!(views[1].status, "Cancelled");
}
