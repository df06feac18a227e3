//! Status enums for bookings and slots.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking.
///
/// Bookings are created confirmed and never transition; the enum exists so the
/// stored value is typed rather than a free string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Confirmed,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Why a slot cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The slot is today and too close to (or before) the current time.
    Past,
    /// The slot is already taken.
    Booked,
}

impl UnavailableReason {
    /// Human-readable tooltip text for a disabled slot.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Past => "Time has passed",
            Self::Booked => "Already booked",
        }
    }
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Past => write!(f, "past"),
            Self::Booked => write!(f, "booked"),
        }
    }
}

impl std::str::FromStr for UnavailableReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "past" => Ok(Self::Past),
            "booked" => Ok(Self::Booked),
            _ => Err(format!("invalid unavailable reason: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display_matches_serde() {
        for reason in [UnavailableReason::Past, UnavailableReason::Booked] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{reason}\""));
            assert_eq!(reason.to_string().parse::<UnavailableReason>().unwrap(), reason);
        }
    }

    #[test]
    fn test_booking_status_serializes_lowercase() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
    }
}
