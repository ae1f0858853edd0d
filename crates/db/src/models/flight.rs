//! Flight entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use flightdesk_core::types::{DbId, Timestamp};

/// A flight row from the `flights` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Flight {
    pub id: DbId,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
    /// `0` means unlimited.
    pub capacity: i32,
}

/// The columns the booking flow reads from a flight while holding its row lock.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct FlightLock {
    pub id: DbId,
    pub departure_time: Timestamp,
    pub capacity: i32,
}

/// DTO for creating a new flight. Codes are uppercased by the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFlight {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
    /// Defaults to 0 (unlimited) if omitted.
    pub capacity: Option<i32>,
}

/// Optional filters for flight search. All present filters must match.
#[derive(Debug, Clone, Default)]
pub struct FlightSearch {
    pub origin: Option<String>,
    pub destination: Option<String>,
    /// UTC calendar date of departure.
    pub departure_date: Option<NaiveDate>,
}

impl FlightSearch {
    pub fn is_empty(&self) -> bool {
        self.origin.is_none() && self.destination.is_none() && self.departure_date.is_none()
    }
}
