use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Another client reserved the slot first. The caller should pick a
    /// different start time and try again.
    #[error("Slot already taken: {0}")]
    SlotTaken(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// Whether the client can fix the failure by retrying with other input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::SlotTaken(_))
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
