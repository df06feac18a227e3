//! Business logic services.
//!
//! - [`auth`] - Guest sign-up, login and validation
//! - [`booking`] - Slot listing and booking confirmation
//!
//! Services take the current time as a [`RequestTime`] argument instead of
//! reading the clock, so tests can pin "now".

pub mod auth;
pub mod booking;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

/// The moment a request is handled.
///
/// `local` is the restaurant's wall clock (used for "today" and the
/// past-slot cutoff); `utc` timestamps stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTime {
    pub local: NaiveDateTime,
    pub utc: DateTime<Utc>,
}

impl RequestTime {
    /// Read the system clock.
    #[must_use]
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            local: now.naive_local(),
            utc: now.with_timezone(&Utc),
        }
    }

    /// Build from a local wall-clock time, treating it as UTC for storage.
    #[must_use]
    pub fn from_local(local: NaiveDateTime) -> Self {
        Self {
            local,
            utc: local.and_utc(),
        }
    }

    /// The restaurant's current date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.local.date()
    }
}
