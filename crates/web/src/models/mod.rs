//! Domain models for the reservations app.
//!
//! - [`user`] - Registered guests as stored in the user list
//! - [`session`] - The per-browser "current user" record
//! - [`booking`] - Confirmed reservations

pub mod booking;
pub mod session;
pub mod user;

pub use booking::{Booking, BookingRequest};
pub use session::{CurrentUser, keys as session_keys};
pub use user::StoredUser;
