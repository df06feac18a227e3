//! Application state shared across handlers.

use std::sync::Arc;

use reservations_core::{AvailabilityRules, ScheduleConfig};

use crate::config::ReservationsConfig;
use crate::db::Database;
use crate::services::auth::AuthService;
use crate::services::booking::BookingService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the stored guest and booking lists and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ReservationsConfig,
    db: Database,
    rules: AvailabilityRules,
}

impl AppState {
    /// Create a new application state with the default availability rules.
    #[must_use]
    pub fn new(config: ReservationsConfig, db: Database) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                rules: AvailabilityRules::default(),
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &ReservationsConfig {
        &self.inner.config
    }

    /// Get a reference to the database handle.
    #[must_use]
    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    /// Get a reference to the seating schedule.
    #[must_use]
    pub fn schedule(&self) -> &ScheduleConfig {
        &self.inner.config.schedule
    }

    /// Get a reference to the availability rules.
    #[must_use]
    pub fn rules(&self) -> &AvailabilityRules {
        &self.inner.rules
    }

    /// Authentication service over the stored guest list.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.db())
    }

    /// Booking service over the stored booking list.
    #[must_use]
    pub fn bookings(&self) -> BookingService<'_> {
        BookingService::new(self.db(), self.schedule(), self.rules())
    }
}
