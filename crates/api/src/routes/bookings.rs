//! Route definitions for the cross-flight `/bookings` listing.

use axum::routing::get;
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET    /                                  -> list_all
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(booking::list_all))
}
