#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A flight or booking does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A business rule forbids the operation in the entity's current state
    /// (e.g. the flight has already departed).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The flight has no confirmed seats left.
    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The bare message without the variant prefix, suitable for API bodies.
    pub fn message(&self) -> &str {
        match self {
            CoreError::NotFound(msg)
            | CoreError::Validation(msg)
            | CoreError::InvalidState(msg)
            | CoreError::CapacityExceeded(msg)
            | CoreError::Internal(msg) => msg,
        }
    }
}
