pub mod bookings;
pub mod flights;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /flights                                   list / search, create
/// /flights/{id}                              get
/// /flights/{id}/bookings                     create booking (POST)
/// /flights/{id}/bookings/{booking_id}        cancel booking (DELETE)
///
/// /bookings                                  list all bookings (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/flights", flights::router())
        .nest("/bookings", bookings::router())
}
