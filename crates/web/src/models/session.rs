//! Session-related types.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reservations_core::{Phone, UserId};

/// Session-stored guest identity.
///
/// The stored user minus the password. Its presence in the session is what
/// "logged in on this browser" means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub phone: Phone,
    pub created_at: DateTime<Utc>,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in guest.
    pub const CURRENT_USER: &str = "restaurant_current_user";
}
