//! User domain types.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use reservations_core::{BookingId, Phone, UserId};

use super::CurrentUser;

/// A registered guest as persisted in the user list.
///
/// The password is kept in plaintext; this app makes no attempt at
/// credential security. `Debug` is implemented manually to keep it out of logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: UserId,
    pub name: String,
    /// Login key, unique across stored users.
    pub phone: Phone,
    pub password: String,
    pub created_at: DateTime<Utc>,
    /// Always empty; bookings reference the user instead.
    #[serde(default)]
    pub bookings: Vec<BookingId>,
}

impl std::fmt::Debug for StoredUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredUser")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

impl StoredUser {
    /// Create a new guest record with a fresh ID.
    #[must_use]
    pub fn new(
        name: String,
        phone: Phone,
        password: &SecretString,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::generate(),
            name,
            phone,
            password: password.expose_secret().to_owned(),
            created_at,
            bookings: Vec::new(),
        }
    }

    /// Exact comparison against the stored password.
    #[must_use]
    pub fn password_matches(&self, candidate: &SecretString) -> bool {
        self.password == candidate.expose_secret()
    }

    /// The session record for this guest.
    #[must_use]
    pub fn to_session(&self) -> CurrentUser {
        CurrentUser {
            id: self.id,
            name: self.name.clone(),
            phone: self.phone.clone(),
            created_at: self.created_at,
        }
    }
}
