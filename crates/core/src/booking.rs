//! Booking enums, normalization and the messages returned by booking operations.
//!
//! Seat class and status are persisted in UPPERCASE and rendered to API
//! consumers in capitalized form ("Economy", "Confirmed").

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Maximum passenger name length, in characters, after trimming.
pub const MAX_PASSENGER_NAME_LEN: usize = 120;

/// Returned by a successful booking.
pub const MSG_BOOKING_CONFIRMED: &str = "Booking confirmed.";

/// Returned by a successful (or repeated) cancellation.
pub const MSG_BOOKING_CANCELED: &str = "Booking canceled successfully.";

pub const MSG_FLIGHT_UNAVAILABLE: &str = "flight/seat unavailable";
pub const MSG_BOOK_DEPARTED: &str = "cannot book a departed flight";
pub const MSG_SOLD_OUT: &str = "flight is sold out";
pub const MSG_BOOKING_NOT_FOUND: &str = "booking not found for this flight";
pub const MSG_CANCEL_DEPARTED: &str = "cannot cancel after departure";

/// Cabin class of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeatClass {
    Economy,
    Business,
    First,
}

impl SeatClass {
    pub const ALL: [SeatClass; 3] = [SeatClass::Economy, SeatClass::Business, SeatClass::First];

    /// Persisted form.
    pub fn as_db_str(self) -> &'static str {
        match self {
            SeatClass::Economy => "ECONOMY",
            SeatClass::Business => "BUSINESS",
            SeatClass::First => "FIRST",
        }
    }

    /// Human-readable form used in listings.
    pub fn label(self) -> &'static str {
        match self {
            SeatClass::Economy => "Economy",
            SeatClass::Business => "Business",
            SeatClass::First => "First",
        }
    }

    /// Normalize raw user input (trim + uppercase) into a seat class.
    ///
    /// This is the single entry point for turning request text into a
    /// `SeatClass`; everything downstream compares and persists the enum.
    pub fn normalize(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_uppercase().as_str() {
            "ECONOMY" => Ok(SeatClass::Economy),
            "BUSINESS" => Ok(SeatClass::Business),
            "FIRST" => Ok(SeatClass::First),
            _ => Err(CoreError::Validation(format!(
                "seatClass must be one of: {}",
                SeatClass::ALL.map(SeatClass::as_db_str).join(", ")
            ))),
        }
    }
}

impl FromStr for SeatClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeatClass::normalize(s)
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// Lifecycle of a booking. The only transition is `Confirmed -> Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_db_str(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = CoreError;

    /// Parse the persisted form. Anything else means the row was written
    /// outside this application.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            other => Err(CoreError::Internal(format!(
                "unknown booking status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// Trim a passenger name and check it is non-empty and within
/// [`MAX_PASSENGER_NAME_LEN`] characters.
pub fn normalize_passenger_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation(
            "passengerName must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_PASSENGER_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "passengerName must be at most {MAX_PASSENGER_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Capitalize an uppercase database value: first letter upper, rest lower.
///
/// Used for values that are not (or no longer) representable by the enums.
pub fn capitalize(value: &str) -> String {
    let lower = value.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
