//! PostgreSQL persistence for flights and bookings.
//!
//! Holds the connection pool helpers, row models, repositories and the
//! transactional [`BookingService`](booking_service::BookingService).

use sqlx::postgres::PgPoolOptions;

pub mod booking_service;
pub mod error;
pub mod models;
pub mod repositories;
pub mod tx;

pub use booking_service::BookingService;
pub use error::DbError;

pub type DbPool = sqlx::PgPool;

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
