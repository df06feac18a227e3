//! Phone number type.
//!
//! Phone numbers are the login key for guests, so they are kept exactly as
//! entered (after trimming) and compared verbatim.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Optional leading `+`, then at least ten ASCII digits, whitespace, dashes
/// or parentheses.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Pattern is a compile-time constant
    Regex::new(r"^\+?(?-u:[\d\s\-()]){10,}$").unwrap()
});

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty after trimming.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input does not look like a phone number.
    #[error("phone number must contain at least 10 digits, spaces, dashes or parentheses")]
    InvalidFormat,
}

/// A guest phone number.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed
/// - Optional leading `+`
/// - At least 10 characters drawn from digits, spaces, `-`, `(` and `)`
///
/// ## Examples
///
/// ```
/// use reservations_core::Phone;
///
/// assert!(Phone::parse("+852 1234 5678").is_ok());
/// assert!(Phone::parse("(555) 123-4567").is_ok());
///
/// assert!(Phone::parse("").is_err());
/// assert!(Phone::parse("12345").is_err());
/// assert!(Phone::parse("call-me-maybe").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or does not match the
    /// accepted phone number shape.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !PHONE_PATTERN.is_match(trimmed) {
            return Err(PhoneError::InvalidFormat);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_phones() {
        assert!(Phone::parse("0123456789").is_ok());
        assert!(Phone::parse("+84 912 345 678").is_ok());
        assert!(Phone::parse("(028) 3822-1234").is_ok());
        assert!(Phone::parse("  0912345678  ").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let phone = Phone::parse("  0912345678 ").unwrap();
        assert_eq!(phone.as_str(), "0912345678");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Phone::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_too_short() {
        assert_eq!(Phone::parse("12345"), Err(PhoneError::InvalidFormat));
    }

    #[test]
    fn test_parse_letters_rejected() {
        assert_eq!(Phone::parse("09123abc5678"), Err(PhoneError::InvalidFormat));
    }

    #[test]
    fn test_plus_only_at_start() {
        assert_eq!(Phone::parse("0912+345678"), Err(PhoneError::InvalidFormat));
    }

    #[test]
    fn test_non_ascii_digits_and_spaces_rejected() {
        assert_eq!(
            Phone::parse("\u{660}\u{669}\u{661}\u{662}\u{663}\u{664}\u{665}\u{666}\u{667}\u{668}"),
            Err(PhoneError::InvalidFormat)
        );
        assert_eq!(
            Phone::parse("0912\u{a0}345\u{a0}678"),
            Err(PhoneError::InvalidFormat)
        );
    }

    #[test]
    fn test_serde_is_transparent() {
        let phone = Phone::parse("0912345678").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"0912345678\"");
    }
}
