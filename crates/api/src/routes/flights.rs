//! Route definitions for the `/flights` resource.
//!
//! Also nests the per-flight booking routes under `/flights/{id}/bookings`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{booking, flight};
use crate::state::AppState;

/// Routes mounted at `/flights`.
///
/// ```text
/// GET    /                                  -> list (search with ?origin=&destination=&date=)
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
///
/// POST   /{id}/bookings                     -> booking::create
/// DELETE /{id}/bookings/{booking_id}        -> booking::cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(flight::list).post(flight::create))
        .route("/{id}", get(flight::get_by_id))
        .route("/{id}/bookings", post(booking::create))
        .route("/{id}/bookings/{booking_id}", delete(booking::cancel))
}
