//! Booking confirmation codes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ConfirmationCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationCodeError {
    /// The code does not start with the restaurant prefix.
    #[error("confirmation code must start with {prefix}")]
    MissingPrefix {
        /// Expected prefix.
        prefix: &'static str,
    },
    /// The part after the prefix is not exactly six ASCII digits.
    #[error("confirmation code must end with {digits} digits")]
    InvalidDigits {
        /// Expected number of digits.
        digits: usize,
    },
}

/// A booking confirmation code such as `GF123456`.
///
/// The code is the restaurant prefix followed by the last six digits of the
/// booking's creation timestamp in milliseconds. Two bookings created in the
/// same millisecond share a code; the booking ID stays unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    /// Prefix shared by all codes.
    pub const PREFIX: &'static str = "GF";

    /// Number of timestamp digits after the prefix.
    pub const DIGITS: usize = 6;

    /// Derive a code from a Unix timestamp in milliseconds.
    #[must_use]
    pub fn from_timestamp_millis(millis: i64) -> Self {
        let suffix = millis.unsigned_abs() % 1_000_000;
        Self(format!("{}{suffix:06}", Self::PREFIX))
    }

    /// Parse a code received from a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is missing or the suffix is not six digits.
    pub fn parse(s: &str) -> Result<Self, ConfirmationCodeError> {
        let digits = s
            .strip_prefix(Self::PREFIX)
            .ok_or(ConfirmationCodeError::MissingPrefix {
                prefix: Self::PREFIX,
            })?;

        if digits.len() != Self::DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfirmationCodeError::InvalidDigits {
                digits: Self::DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
