//! Handlers for the `/flights` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use flightdesk_core::error::CoreError;
use flightdesk_core::types::{DbId, Timestamp};
use flightdesk_db::models::flight::{CreateFlight, Flight, FlightSearch};
use flightdesk_db::repositories::FlightRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::FlightSearchParams;
use crate::state::AppState;

/// Request body for `POST /flights`. Shape checks only; the flight rules
/// (patterns, schedule, duplicates) run in the repository.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateFlightRequest {
    #[validate(length(min = 2, max = 12))]
    pub flight_number: String,
    #[validate(length(equal = 3))]
    pub origin: String,
    #[validate(length(equal = 3))]
    pub destination: String,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
}

impl From<CreateFlightRequest> for CreateFlight {
    fn from(req: CreateFlightRequest) -> Self {
        Self {
            flight_number: req.flight_number.trim().to_string(),
            origin: req.origin.trim().to_string(),
            destination: req.destination.trim().to_string(),
            departure_time: req.departure_time,
            arrival_time: req.arrival_time,
            capacity: req.capacity,
        }
    }
}

/// GET /api/flights
///
/// Lists every flight, or searches when any of `origin`, `destination` or
/// `date` is supplied. A search with no matches is a 404.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FlightSearchParams>,
) -> AppResult<Json<Vec<Flight>>> {
    let search = to_search(params)?;
    if search.is_empty() {
        let flights = FlightRepo::list(&state.pool).await?;
        return Ok(Json(flights));
    }

    let flights = FlightRepo::search(&state.pool, &search).await?;
    if flights.is_empty() {
        return Err(AppError::Core(CoreError::NotFound(
            "No flight found matching provided queries".into(),
        )));
    }
    Ok(Json(flights))
}

/// GET /api/flights/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Flight>> {
    let flight = FlightRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound("Flight not found".into())))?;
    Ok(Json(flight))
}

/// POST /api/flights
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFlightRequest>,
) -> AppResult<(StatusCode, Json<Flight>)> {
    input.validate()?;
    let flight = FlightRepo::create(&state.pool, &input.into()).await?;
    Ok((StatusCode::CREATED, Json(flight)))
}

/// Blank query values count as absent.
fn to_search(params: FlightSearchParams) -> AppResult<FlightSearch> {
    let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    let departure_date = non_blank(params.date)
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                AppError::BadRequest(format!("date must be formatted as YYYY-MM-DD, got '{raw}'"))
            })
        })
        .transpose()?;

    Ok(FlightSearch {
        origin: non_blank(params.origin),
        destination: non_blank(params.destination),
        departure_date,
    })
}
