//! Session middleware configuration.
//!
//! The session is the per-browser record of who is logged in. It lives in an
//! in-memory tower-sessions store keyed by cookie, so a server restart logs
//! every guest out while stored guests and bookings survive (when a data file
//! is configured).

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::ReservationsConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "reservations_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// Cookies are marked `Secure` when the configured base URL is https.
#[must_use]
pub fn create_session_layer(config: &ReservationsConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
