//! Query parameter types for API handlers.

use serde::Deserialize;

/// Flight search filters (`?origin=&destination=&date=`).
///
/// `date` is a `YYYY-MM-DD` UTC calendar date; it is parsed in the handler so
/// a malformed value produces a JSON 400 rather than a plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct FlightSearchParams {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
}
