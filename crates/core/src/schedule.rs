//! Daily slot generation and simulated availability.
//!
//! The restaurant seats guests at fixed times between opening and the last
//! seating. [`ScheduleConfig::generate_time_slots`] produces that list; it is
//! pure and returns the same times on every call. [`available_slots_for_date`]
//! then marks slots unavailable for a specific date:
//!
//! 1. Today's slots that start before `now + past_cutoff` are `past`.
//! 2. Any other slot is `booked` with `booked_probability`.
//! 3. Weekend slots in the peak hours get a second, independent
//!    `weekend_peak_probability` chance of being `booked`.
//!
//! There is no real occupancy data behind step 2 and 3; availability is
//! simulated and differs between calls unless the caller fixes the RNG seed.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::UnavailableReason;

/// Format used for slot times on the wire and in storage (`19:30`).
pub const SLOT_TIME_FORMAT: &str = "%H:%M";

/// Format used for slot times shown to guests (`7:30 PM`).
pub const SLOT_DISPLAY_FORMAT: &str = "%-I:%M %p";

/// Errors raised while building a schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("slot interval must be at least one minute")]
    ZeroInterval,
    #[error("booking window must be at least one day")]
    ZeroWindow,
}

/// A bookable time on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Start time, serialized as `HH:MM`.
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    /// Guest-facing label, e.g. `10:30 AM`.
    pub display: String,
    pub available: bool,
    /// Set only when `available` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnavailableReason>,
}

impl Slot {
    /// Create an available slot starting at `time`.
    #[must_use]
    pub fn new(time: NaiveTime) -> Self {
        Self {
            time,
            display: time.format(SLOT_DISPLAY_FORMAT).to_string(),
            available: true,
            reason: None,
        }
    }

    /// The slot time as `HH:MM`.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.time.format(SLOT_TIME_FORMAT).to_string()
    }

    fn mark_unavailable(&mut self, reason: UnavailableReason) {
        self.available = false;
        self.reason = Some(reason);
    }
}

/// Parse a `HH:MM` slot time as submitted by a client.
#[must_use]
pub fn parse_slot_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), SLOT_TIME_FORMAT).ok()
}

/// Opening hours, seating interval and how far ahead guests may book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// First seating of the day.
    pub opening: NaiveTime,
    /// Last seating of the day (inclusive).
    pub last_seating: NaiveTime,
    interval_minutes: u32,
    booking_window_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            opening: NaiveTime::from_hms_opt(10, 30, 0).unwrap_or_default(),
            last_seating: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or_default(),
            interval_minutes: 90,
            booking_window_days: 30,
        }
    }
}

impl ScheduleConfig {
    /// Build a schedule.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::ZeroInterval` if `interval_minutes` is zero and
    /// `ScheduleError::ZeroWindow` if `booking_window_days` is zero.
    pub const fn new(
        opening: NaiveTime,
        last_seating: NaiveTime,
        interval_minutes: u32,
        booking_window_days: u32,
    ) -> Result<Self, ScheduleError> {
        if interval_minutes == 0 {
            return Err(ScheduleError::ZeroInterval);
        }
        if booking_window_days == 0 {
            return Err(ScheduleError::ZeroWindow);
        }
        Ok(Self {
            opening,
            last_seating,
            interval_minutes,
            booking_window_days,
        })
    }

    /// Minutes between consecutive seatings.
    #[must_use]
    pub const fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    /// Number of days after today that can still be booked.
    #[must_use]
    pub const fn booking_window_days(&self) -> u32 {
        self.booking_window_days
    }

    /// Generate the day's seatings from opening to last seating.
    ///
    /// Stops early rather than wrapping past midnight.
    #[must_use]
    pub fn generate_time_slots(&self) -> Vec<Slot> {
        let step = TimeDelta::minutes(i64::from(self.interval_minutes));
        let mut slots = Vec::new();
        let mut time = self.opening;

        while time <= self.last_seating {
            slots.push(Slot::new(time));

            let (next, wrapped) = time.overflowing_add_signed(step);
            if wrapped != 0 {
                break;
            }
            time = next;
        }

        slots
    }

    /// Whether `time` is one of the generated seatings.
    #[must_use]
    pub fn has_slot(&self, time: NaiveTime) -> bool {
        self.generate_time_slots().iter().any(|slot| slot.time == time)
    }

    /// Last bookable date given today's date.
    #[must_use]
    pub fn last_bookable_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(chrono::Days::new(u64::from(self.booking_window_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether `date` falls inside the booking window starting at `today`.
    #[must_use]
    pub fn is_bookable_date(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= today && date <= self.last_bookable_date(today)
    }
}

/// Tunables for simulated availability.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityRules {
    /// Today's slots starting earlier than `now + past_cutoff` are `past`.
    pub past_cutoff: TimeDelta,
    /// Chance that any slot is already `booked`.
    pub booked_probability: f64,
    /// Extra chance that a weekend peak slot is `booked`.
    pub weekend_peak_probability: f64,
    /// Hours (inclusive) that count as weekend peak.
    pub weekend_peak_hours: RangeInclusive<u32>,
}

impl Default for AvailabilityRules {
    fn default() -> Self {
        Self {
            past_cutoff: TimeDelta::hours(2),
            booked_probability: 0.3,
            weekend_peak_probability: 0.4,
            weekend_peak_hours: 19..=21,
        }
    }
}

impl AvailabilityRules {
    /// Whether a slot at `time` on `date` is too soon to book at `now`.
    #[must_use]
    pub fn is_past(&self, date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> bool {
        date == now.date() && date.and_time(time) < now + self.past_cutoff
    }

    fn is_weekend_peak(&self, date: NaiveDate, time: NaiveTime) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
            && self.weekend_peak_hours.contains(&time.hour())
    }
}

/// Mark `slots` available or not for `date` as seen at `now`.
///
/// Returns a fresh list; the input slots are not modified. Each non-past slot
/// consumes one or two draws from `rng`.
pub fn available_slots_for_date<R: Rng>(
    slots: &[Slot],
    date: NaiveDate,
    now: NaiveDateTime,
    rules: &AvailabilityRules,
    rng: &mut R,
) -> Vec<Slot> {
    slots
        .iter()
        .map(|slot| {
            let mut slot = Slot::new(slot.time);

            if rules.is_past(date, slot.time, now) {
                slot.mark_unavailable(UnavailableReason::Past);
            } else if rng.random::<f64>() < rules.booked_probability
                || (rules.is_weekend_peak(date, slot.time)
                    && rng.random::<f64>() < rules.weekend_peak_probability)
            {
                slot.mark_unavailable(UnavailableReason::Booked);
            }

            slot
        })
        .collect()
}

/// Serde adapter for `HH:MM` times, for use with `#[serde(with = "...")]`.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::SLOT_TIME_FORMAT;

    /// Serialize a time as `HH:MM`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(SLOT_TIME_FORMAT))
    }

    /// Deserialize a `HH:MM` string.
    ///
    /// # Errors
    ///
    /// Fails if the string is not a valid `HH:MM` time.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, SLOT_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn never_booked() -> AvailabilityRules {
        AvailabilityRules {
            booked_probability: 0.0,
            weekend_peak_probability: 0.0,
            ..AvailabilityRules::default()
        }
    }

    #[test]
    fn test_default_schedule_steps_ninety_minutes() {
        let times: Vec<String> = ScheduleConfig::default()
            .generate_time_slots()
            .iter()
            .map(Slot::time_label)
            .collect();

        assert_eq!(
            times,
            [
                "10:30", "12:00", "13:30", "15:00", "16:30", "18:00", "19:30", "21:00", "22:30"
            ]
        );
    }

    #[test]
    fn test_display_uses_twelve_hour_clock() {
        let slots = ScheduleConfig::default().generate_time_slots();
        assert_eq!(slots[0].display, "10:30 AM");
        assert_eq!(slots[1].display, "12:00 PM");
        assert_eq!(slots[6].display, "7:30 PM");
    }

    #[test]
    fn test_generation_is_stable() {
        let config = ScheduleConfig::default();
        assert_eq!(config.generate_time_slots(), config.generate_time_slots());
    }

    #[test]
    fn test_last_seating_is_inclusive() {
        let config = ScheduleConfig::new(at(10, 30), at(23, 0), 30, 30).unwrap();
        let slots = config.generate_time_slots();
        assert_eq!(slots.last().unwrap().time, at(23, 0));
        assert_eq!(slots.len(), 26);
    }

    #[test]
    fn test_inverted_hours_yield_nothing() {
        let config = ScheduleConfig::new(at(22, 0), at(10, 0), 60, 30).unwrap();
        assert!(config.generate_time_slots().is_empty());
    }

    #[test]
    fn test_generation_stops_at_midnight() {
        let config = ScheduleConfig::new(at(22, 0), at(23, 59), 120, 30).unwrap();
        let slots = config.generate_time_slots();
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn test_zero_values_rejected() {
        assert_eq!(
            ScheduleConfig::new(at(10, 0), at(22, 0), 0, 30),
            Err(ScheduleError::ZeroInterval)
        );
        assert_eq!(
            ScheduleConfig::new(at(10, 0), at(22, 0), 60, 0),
            Err(ScheduleError::ZeroWindow)
        );
    }

    #[test]
    fn test_booking_window() {
        let config = ScheduleConfig::default();
        let today = date("2026-10-19");
        assert!(config.is_bookable_date(today, today));
        assert!(config.is_bookable_date(date("2026-11-18"), today));
        assert!(!config.is_bookable_date(date("2026-11-19"), today));
        assert!(!config.is_bookable_date(date("2026-10-18"), today));
    }

    #[test]
    fn test_has_slot() {
        let config = ScheduleConfig::default();
        assert!(config.has_slot(at(19, 30)));
        assert!(!config.has_slot(at(19, 0)));
    }

    #[test]
    fn test_today_marks_slots_within_cutoff_as_past() {
        let slots = ScheduleConfig::default().generate_time_slots();
        let today = date("2026-10-19");
        let now = today.and_time(at(14, 0));
        let mut rng = StdRng::seed_from_u64(7);

        let result = available_slots_for_date(&slots, today, now, &never_booked(), &mut rng);

        for slot in &result {
            if slot.time < at(16, 0) {
                assert_eq!(slot.reason, Some(UnavailableReason::Past), "{}", slot.display);
                assert!(!slot.available);
            } else {
                assert!(slot.available, "{}", slot.display);
                assert_eq!(slot.reason, None);
            }
        }
    }

    #[test]
    fn test_future_dates_have_no_past_slots() {
        let slots = ScheduleConfig::default().generate_time_slots();
        let now = date("2026-10-19").and_time(at(23, 30));
        let mut rng = StdRng::seed_from_u64(1);

        let result = available_slots_for_date(
            &slots,
            date("2026-10-20"),
            now,
            &AvailabilityRules::default(),
            &mut rng,
        );

        assert!(result
            .iter()
            .all(|slot| slot.reason != Some(UnavailableReason::Past)));
    }

    #[test]
    fn test_certain_booking_marks_everything_booked() {
        let slots = ScheduleConfig::default().generate_time_slots();
        let rules = AvailabilityRules {
            booked_probability: 1.0,
            ..AvailabilityRules::default()
        };
        let now = date("2026-10-19").and_time(at(9, 0));
        let mut rng = StdRng::seed_from_u64(3);

        let result = available_slots_for_date(&slots, date("2026-10-21"), now, &rules, &mut rng);

        assert!(result
            .iter()
            .all(|slot| !slot.available && slot.reason == Some(UnavailableReason::Booked)));
    }

    #[test]
    fn test_weekend_peak_only_affects_weekend_evenings() {
        let slots = ScheduleConfig::default().generate_time_slots();
        let rules = AvailabilityRules {
            booked_probability: 0.0,
            weekend_peak_probability: 1.0,
            ..AvailabilityRules::default()
        };
        let now = date("2026-10-19").and_time(at(9, 0));
        let mut rng = StdRng::seed_from_u64(11);

        let saturday = available_slots_for_date(&slots, date("2026-10-24"), now, &rules, &mut rng);
        let booked: Vec<String> = saturday
            .iter()
            .filter(|slot| !slot.available)
            .map(Slot::time_label)
            .collect();
        assert_eq!(booked, ["19:30", "21:00"]);

        let friday = available_slots_for_date(&slots, date("2026-10-23"), now, &rules, &mut rng);
        assert!(friday.iter().all(|slot| slot.available));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let slots = ScheduleConfig::default().generate_time_slots();
        let now = date("2026-10-19").and_time(at(9, 0));
        let rules = AvailabilityRules::default();

        let first = available_slots_for_date(
            &slots,
            date("2026-10-25"),
            now,
            &rules,
            &mut StdRng::seed_from_u64(42),
        );
        let second = available_slots_for_date(
            &slots,
            date("2026-10-25"),
            now,
            &rules,
            &mut StdRng::seed_from_u64(42),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn test_slot_serializes_with_short_time() {
        let mut slot = Slot::new(at(19, 30));
        slot.mark_unavailable(UnavailableReason::Booked);

        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "time": "19:30",
                "display": "7:30 PM",
                "available": false,
                "reason": "booked",
            })
        );
    }

    #[test]
    fn test_parse_slot_time() {
        assert_eq!(parse_slot_time("19:30"), Some(at(19, 30)));
        assert_eq!(parse_slot_time(" 09:05 "), Some(at(9, 5)));
        assert_eq!(parse_slot_time("7pm"), None);
    }
}
