//! Core types for the reservations app.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod confirmation;
pub mod id;
pub mod phone;
pub mod status;

pub use confirmation::{ConfirmationCode, ConfirmationCodeError};
pub use id::*;
pub use phone::{Phone, PhoneError};
pub use status::*;
