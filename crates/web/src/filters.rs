//! Custom Askama template filters and display helpers.

use std::fmt::Display;

use chrono::{Datelike, NaiveDate, NaiveTime};

use reservations_core::schedule::SLOT_DISPLAY_FORMAT;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(chrono::Local::now().year())
}

/// Formats a party size as `1 guest` or `N guests`.
///
/// Usage in templates: `{{ booking.guests|guest_label }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn guest_label(guests: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(guests_text(&guests.to_string()))
}

fn guests_text(count: &str) -> String {
    if count == "1" {
        "1 guest".to_string()
    } else {
        format!("{count} guests")
    }
}

/// English ordinal suffix for a day of the month.
#[must_use]
pub const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long form used on the confirmation page.
///
/// `Friday, October 23rd 2026 at 7:30 PM`
#[must_use]
pub fn long_date_time(date: NaiveDate, time: NaiveTime) -> String {
    format!(
        "{}, {} {}{} {} at {}",
        date.format("%A"),
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year(),
        time.format(SLOT_DISPLAY_FORMAT)
    )
}

/// Short form used in the reservations list: `Fri, Oct 23 2026`.
#[must_use]
pub fn short_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d %Y").to_string()
}
