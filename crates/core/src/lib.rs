//! Reservations Core - Shared types and slot scheduling.
//!
//! This crate provides the types and pure logic used by the reservations web app:
//!
//! # Architecture
//!
//! The core crate contains only types and algorithms - no I/O, no storage
//! access, no HTTP. Time and randomness are passed in by the caller so the
//! scheduling logic can be tested deterministically.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, phone numbers, confirmation codes and statuses
//! - [`schedule`] - Daily slot generation and simulated availability

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod schedule;
pub mod types;

pub use schedule::{AvailabilityRules, ScheduleConfig, ScheduleError, Slot};
pub use types::*;
