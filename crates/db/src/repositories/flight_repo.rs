//! Repository for the `flights` table.

use flightdesk_core::error::CoreError;
use flightdesk_core::flight::{
    validate_airport_code, validate_capacity, validate_flight_number, validate_schedule,
    UNLIMITED_CAPACITY,
};
use flightdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::error::DbError;
use crate::models::flight::{CreateFlight, Flight, FlightLock, FlightSearch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, flight_number, origin, destination, departure_time, arrival_time, capacity";

pub struct FlightRepo;

impl FlightRepo {
    /// Validate and insert a new flight, returning the created row.
    ///
    /// Flight number and airport codes are stored uppercase. A flight number
    /// that already exists (case-insensitively) is a validation error; a
    /// concurrent duplicate that slips past the check fails on the
    /// `uq_flights_flight_number` index instead.
    pub async fn create(pool: &PgPool, input: &CreateFlight) -> Result<Flight, DbError> {
        validate_flight_number(&input.flight_number)?;
        validate_airport_code("origin", &input.origin)?;
        validate_airport_code("destination", &input.destination)?;
        validate_schedule(input.departure_time, input.arrival_time)?;
        let capacity = input.capacity.unwrap_or(UNLIMITED_CAPACITY);
        validate_capacity(capacity)?;

        if Self::flight_number_exists(pool, &input.flight_number).await? {
            return Err(CoreError::Validation("flight_number already exists".into()).into());
        }

        let query = format!(
            "INSERT INTO flights (flight_number, origin, destination, departure_time, arrival_time, capacity)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let flight = sqlx::query_as::<_, Flight>(&query)
            .bind(input.flight_number.to_uppercase())
            .bind(input.origin.to_uppercase())
            .bind(input.destination.to_uppercase())
            .bind(input.departure_time)
            .bind(input.arrival_time)
            .bind(capacity)
            .fetch_one(pool)
            .await?;

        tracing::info!(flight_id = flight.id, flight_number = %flight.flight_number, "Flight created");
        Ok(flight)
    }

    /// Case-insensitive check for an existing flight number.
    pub async fn flight_number_exists(pool: &PgPool, flight_number: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM flights WHERE UPPER(flight_number) = UPPER($1))",
        )
        .bind(flight_number)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Flight>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM flights WHERE id = $1");
        sqlx::query_as::<_, Flight>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all flights ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Flight>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM flights ORDER BY id");
        sqlx::query_as::<_, Flight>(&query).fetch_all(pool).await
    }

    /// Search flights by origin, destination and UTC departure date, earliest
    /// departure first. Absent filters are ignored; codes match case-insensitively.
    pub async fn search(pool: &PgPool, search: &FlightSearch) -> Result<Vec<Flight>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM flights"));
        let mut separator = " WHERE ";

        if let Some(origin) = &search.origin {
            builder
                .push(separator)
                .push("UPPER(origin) = ")
                .push_bind(origin.to_uppercase());
            separator = " AND ";
        }
        if let Some(destination) = &search.destination {
            builder
                .push(separator)
                .push("UPPER(destination) = ")
                .push_bind(destination.to_uppercase());
            separator = " AND ";
        }
        if let Some(date) = search.departure_date {
            builder
                .push(separator)
                .push("(departure_time AT TIME ZONE 'UTC')::date = ")
                .push_bind(date);
        }

        builder.push(" ORDER BY departure_time ASC, id ASC");
        builder.build_query_as::<Flight>().fetch_all(pool).await
    }

    /// Read a flight's booking-relevant columns and take an exclusive row lock.
    ///
    /// The lock is held until the surrounding transaction ends, so concurrent
    /// bookers of the same flight queue here.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<FlightLock>, sqlx::Error> {
        sqlx::query_as::<_, FlightLock>(
            "SELECT id, departure_time, capacity FROM flights WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }
}
