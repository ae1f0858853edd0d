//! Flight field rules shared by the repository and API layers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::Timestamp;

/// A capacity of zero means the flight accepts unlimited bookings.
pub const UNLIMITED_CAPACITY: i32 = 0;

static FLIGHT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{2,12}$").expect("valid flight number regex"));

static AIRPORT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{3}$").expect("valid airport code regex"));

/// Validate a flight number: 2-12 letters, digits or dashes.
pub fn validate_flight_number(value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation("\"flight_number\" is required".into()));
    }
    if !FLIGHT_NUMBER_RE.is_match(value) {
        return Err(CoreError::Validation(
            "flight_number must be 2-12 chars (letters, numbers, dash)".into(),
        ));
    }
    Ok(())
}

/// Validate a 3-letter IATA airport code. `field` names the offending input.
pub fn validate_airport_code(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("\"{field}\" is required")));
    }
    if !AIRPORT_CODE_RE.is_match(value) {
        return Err(CoreError::Validation(format!(
            "{field} must be a 3-letter IATA code"
        )));
    }
    Ok(())
}

pub fn validate_schedule(departure: Timestamp, arrival: Timestamp) -> Result<(), CoreError> {
    if arrival <= departure {
        return Err(CoreError::Validation(
            "arrival_time must be after departure_time".into(),
        ));
    }
    Ok(())
}

pub fn validate_capacity(capacity: i32) -> Result<(), CoreError> {
    if capacity < UNLIMITED_CAPACITY {
        return Err(CoreError::Validation(
            "capacity must be zero (unlimited) or a positive number of seats".into(),
        ));
    }
    Ok(())
}

/// Whether a flight with `departure` can no longer be booked or cancelled at `now`.
pub fn has_departed(departure: Timestamp, now: Timestamp) -> bool {
    departure <= now
}

/// Whether `confirmed` bookings already fill a flight of `capacity`.
pub fn is_sold_out(capacity: i32, confirmed: i64) -> bool {
    capacity > UNLIMITED_CAPACITY && confirmed >= i64::from(capacity)
}
