use flightdesk_core::error::CoreError;

/// Error returned by repository and service calls that apply business rules.
///
/// Keeps domain failures (`Core`) distinguishable from infrastructure
/// failures (`Database`) so the transport layer can map them separately.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
