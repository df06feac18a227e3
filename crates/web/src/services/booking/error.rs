//! Booking error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur while listing slots or confirming a booking.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The request is incomplete or not bookable. Carries the guest-facing message.
    #[error("{0}")]
    Validation(String),

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
