//! Booking repository.

use reservations_core::UserId;

use super::{Database, RepositoryError};
use crate::models::Booking;
use crate::storage::keys;

/// Repository for confirmed bookings.
///
/// Append-only: nothing here updates or deletes a booking.
pub struct BookingRepository<'a> {
    db: &'a Database,
}

impl<'a> BookingRepository<'a> {
    /// Create a new booking repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All bookings in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the list cannot be read or decoded.
    pub fn list(&self) -> Result<Vec<Booking>, RepositoryError> {
        self.db.read_list(keys::BOOKINGS)
    }

    /// Bookings made by one guest, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the list cannot be read or decoded.
    pub fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|booking| booking.user_id == user_id)
            .collect())
    }

    /// Append one booking to the stored list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if storage fails.
    pub async fn append(&self, booking: Booking) -> Result<Booking, RepositoryError> {
        let _guard = self.db.write_lock().await;

        let mut bookings = self.list()?;
        bookings.push(booking.clone());
        self.db.write_list(keys::BOOKINGS, &bookings).await?;

        Ok(booking)
    }
}
