use std::sync::Arc;

use flightdesk_db::BookingService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and service are reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: flightdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Booking transaction manager, constructed over `pool`.
    pub bookings: BookingService,
}

impl AppState {
    pub fn new(pool: flightdesk_db::DbPool, config: ServerConfig) -> Self {
        Self {
            bookings: BookingService::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}
