//! Booking domain types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use reservations_core::schedule::{hh_mm, parse_slot_time};
use reservations_core::{BookingId, BookingStatus, ConfirmationCode, Phone, UserId};

/// A confirmed reservation.
///
/// Guest fields are copied from the session at confirmation time so the
/// record stands on its own. Bookings are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub confirmation_number: ConfirmationCode,
    pub user_id: UserId,
    pub user_name: String,
    pub user_phone: Phone,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub display_time: String,
    pub guests: u8,
    pub special_requests: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// What the guest selected on the booking screen.
///
/// `date` and `time` are `None` when nothing (or nothing parseable) was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub guests: u8,
    pub special_requests: String,
}

impl BookingRequest {
    /// Default party size preselected on the booking screen.
    pub const DEFAULT_GUESTS: u8 = 2;

    /// Build a request from raw form or JSON input.
    ///
    /// Blank or malformed dates and times become `None`; special requests are
    /// trimmed. A missing party size means the default, while one that is not
    /// a small whole number becomes 0 so that confirmation rejects it.
    #[must_use]
    pub fn from_input(
        date: Option<&str>,
        time: Option<&str>,
        guests: Option<&str>,
        special_requests: Option<&str>,
    ) -> Self {
        Self {
            date: date.and_then(parse_date),
            time: time.and_then(parse_slot_time),
            guests: parse_guests(guests),
            special_requests: special_requests.unwrap_or_default().trim().to_owned(),
        }
    }
}

fn parse_guests(raw: Option<&str>) -> u8 {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => raw.parse().unwrap_or(0),
        None => BookingRequest::DEFAULT_GUESTS,
    }
}

/// Parse a `YYYY-MM-DD` date as submitted by a client.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_parses_and_trims() {
        let request = BookingRequest::from_input(
            Some("2026-10-23"),
            Some("19:30"),
            Some(" 4 "),
            Some("  window seat please \n"),
        );

        assert_eq!(request.date, NaiveDate::from_ymd_opt(2026, 10, 23));
        assert_eq!(request.time, NaiveTime::from_hms_opt(19, 30, 0));
        assert_eq!(request.guests, 4);
        assert_eq!(request.special_requests, "window seat please");
    }

    #[test]
    fn test_from_input_unparseable_guests() {
        for raw in ["abc", "300", "-1", "2.5"] {
            let request = BookingRequest::from_input(None, None, Some(raw), None);
            assert_eq!(request.guests, 0, "guests {raw:?}");
        }
    }

    #[test]
    fn test_from_input_blank_fields() {
        let request = BookingRequest::from_input(Some(""), Some("soon"), Some(" "), None);

        assert_eq!(request.date, None);
        assert_eq!(request.time, None);
        assert_eq!(request.guests, BookingRequest::DEFAULT_GUESTS);
        assert_eq!(request.special_requests, "");
    }

    #[test]
    fn test_booking_json_shape() {
        let booking = Booking {
            id: BookingId::generate(),
            confirmation_number: ConfirmationCode::from_timestamp_millis(1_792_345_678_901),
            user_id: UserId::generate(),
            user_name: "Linh".to_string(),
            user_phone: Phone::parse("0912345678").unwrap(),
            date: NaiveDate::from_ymd_opt(2026, 10, 23).unwrap(),
            time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            display_time: "7:30 PM".to_string(),
            guests: 2,
            special_requests: String::new(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["confirmationNumber"], "GF678901");
        assert_eq!(json["date"], "2026-10-23");
        assert_eq!(json["time"], "19:30");
        assert_eq!(json["displayTime"], "7:30 PM");
        assert_eq!(json["status"], "confirmed");

        let back: Booking = serde_json::from_value(json).unwrap();
        assert_eq!(back, booking);
    }
}
