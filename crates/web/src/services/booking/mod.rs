//! Booking service.
//!
//! Lists the day's slots with simulated availability and turns a guest's
//! selection into a confirmed booking. There is no conflict check against
//! existing bookings: availability is simulated, so a confirmation only
//! re-checks what is deterministic (date window, slot exists, slot not past).

mod error;

pub use error::BookingError;

use rand::Rng;

use reservations_core::schedule::available_slots_for_date;
use reservations_core::{
    AvailabilityRules, BookingId, BookingStatus, ConfirmationCode, ScheduleConfig, Slot, UserId,
};

use crate::db::{BookingRepository, Database};
use crate::models::{Booking, BookingRequest, CurrentUser};
use crate::services::RequestTime;

/// Smallest party that can be booked.
pub const MIN_GUESTS: u8 = 1;

/// Largest party that can be booked online.
pub const MAX_GUESTS: u8 = 10;

/// Maximum length of the special requests note, in characters.
pub const MAX_SPECIAL_REQUESTS_LENGTH: usize = 500;

/// Guest-facing validation messages.
pub mod messages {
    pub const SELECT_DATE_AND_TIME: &str = "Please select a date and time for your reservation.";
    pub const UNKNOWN_TIME: &str = "Please choose one of the listed times.";
    pub const TIME_PASSED: &str = "That time is no longer available. Please choose a later time.";
    pub const INVALID_GUESTS: &str = "Guest count must be between 1 and 10.";
    pub const SPECIAL_REQUESTS_TOO_LONG: &str =
        "Special requests must be at most 500 characters.";

    /// Shown when the date falls outside today..=today+`window_days`.
    #[must_use]
    pub fn date_out_of_range(window_days: u32) -> String {
        format!("Please choose a date between today and {window_days} days from now.")
    }
}

/// Booking service.
pub struct BookingService<'a> {
    bookings: BookingRepository<'a>,
    schedule: &'a ScheduleConfig,
    rules: &'a AvailabilityRules,
}

impl<'a> BookingService<'a> {
    /// Create a new booking service.
    #[must_use]
    pub const fn new(
        db: &'a Database,
        schedule: &'a ScheduleConfig,
        rules: &'a AvailabilityRules,
    ) -> Self {
        Self {
            bookings: BookingRepository::new(db),
            schedule,
            rules,
        }
    }

    /// The day's slots for `date` with simulated availability.
    ///
    /// Calling this twice for the same date returns the same times but may
    /// mark different slots as booked.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Validation` if `date` is outside the booking window.
    pub fn slots_for_date<R: Rng>(
        &self,
        date: chrono::NaiveDate,
        now: RequestTime,
        rng: &mut R,
    ) -> Result<Vec<Slot>, BookingError> {
        if !self.schedule.is_bookable_date(date, now.today()) {
            return Err(self.date_out_of_range());
        }

        let slots = self.schedule.generate_time_slots();
        Ok(available_slots_for_date(
            &slots, date, now.local, self.rules, rng,
        ))
    }

    /// Confirm a booking for the logged-in guest.
    ///
    /// Appends exactly one record to the stored booking list.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Validation` with the first failing rule, or
    /// `BookingError::Repository` if the booking cannot be stored.
    pub async fn confirm(
        &self,
        user: &CurrentUser,
        request: BookingRequest,
        now: RequestTime,
    ) -> Result<Booking, BookingError> {
        let (Some(date), Some(time)) = (request.date, request.time) else {
            return Err(invalid(messages::SELECT_DATE_AND_TIME));
        };

        if !self.schedule.is_bookable_date(date, now.today()) {
            return Err(self.date_out_of_range());
        }

        if !self.schedule.has_slot(time) {
            return Err(invalid(messages::UNKNOWN_TIME));
        }

        if self.rules.is_past(date, time, now.local) {
            return Err(invalid(messages::TIME_PASSED));
        }

        if !(MIN_GUESTS..=MAX_GUESTS).contains(&request.guests) {
            return Err(invalid(messages::INVALID_GUESTS));
        }

        if request.special_requests.chars().count() > MAX_SPECIAL_REQUESTS_LENGTH {
            return Err(invalid(messages::SPECIAL_REQUESTS_TOO_LONG));
        }

        let slot = Slot::new(time);
        let booking = Booking {
            id: BookingId::generate(),
            confirmation_number: ConfirmationCode::from_timestamp_millis(
                now.utc.timestamp_millis(),
            ),
            user_id: user.id,
            user_name: user.name.clone(),
            user_phone: user.phone.clone(),
            date,
            time,
            display_time: slot.display,
            guests: request.guests,
            special_requests: request.special_requests,
            status: BookingStatus::Confirmed,
            created_at: now.utc,
        };

        let booking = self.bookings.append(booking).await?;

        tracing::info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            confirmation = %booking.confirmation_number,
            date = %booking.date,
            time = %booking.display_time,
            guests = booking.guests,
            "Booking confirmed"
        );

        Ok(booking)
    }

    /// The guest's bookings in creation order.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Repository` if the list cannot be read.
    pub fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingError> {
        Ok(self.bookings.list_for_user(user_id)?)
    }

    fn date_out_of_range(&self) -> BookingError {
        BookingError::Validation(messages::date_out_of_range(
            self.schedule.booking_window_days(),
        ))
    }
}

fn invalid(message: &str) -> BookingError {
    BookingError::Validation(message.to_owned())
}
