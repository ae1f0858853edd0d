//! Handlers for bookings: nested under `/flights/{id}/bookings` for
//! create/cancel, and the cross-flight `/bookings` listing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use flightdesk_core::types::DbId;
use flightdesk_db::models::booking::{BookingView, CancelBookingResponse, CreateBookingResponse};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::state::AppState;

/// Request body for `POST /flights/{id}/bookings`.
///
/// ```json
/// { "passengerName": "John Doe", "seatClass": "ECONOMY" }
/// ```
///
/// `seatClass` is matched case-insensitively. The passenger name length limit
/// applies to the trimmed name, so it is enforced by the booking service.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1))]
    pub passenger_name: String,
    #[validate(length(min = 1))]
    pub seat_class: String,
}

/// POST /api/flights/{id}/bookings
pub async fn create(
    State(state): State<AppState>,
    Path(flight_id): Path<DbId>,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<CreateBookingResponse>)> {
    input.validate()?;
    let created = state
        .bookings
        .create_booking(flight_id, &input.passenger_name, &input.seat_class)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/flights/{id}/bookings/{booking_id}
pub async fn cancel(
    State(state): State<AppState>,
    Path((flight_id, booking_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<CancelBookingResponse>> {
    let canceled = state.bookings.cancel_booking(flight_id, booking_id).await?;
    Ok(Json(canceled))
}

/// GET /api/bookings
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<BookingView>>> {
    let bookings = state.bookings.list_bookings().await?;
    Ok(Json(bookings))
}
