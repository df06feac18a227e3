//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Sign-in / sign-up page (?panel=signup)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (storage reachable)
//!
//! # Auth
//! POST /auth/login             - Login action
//! POST /auth/signup            - Sign-up action (logs the guest in)
//! POST /auth/logout            - Logout action
//!
//! # Booking (requires auth)
//! GET  /booking                - Booking page (?date=YYYY-MM-DD, default today)
//! POST /booking                - Confirm booking
//! GET  /bookings               - The guest's reservations
//!
//! # JSON API
//! GET  /api/slots              - Slots with availability for ?date=
//! GET  /api/bookings           - The guest's reservations (requires auth)
//! POST /api/bookings           - Confirm booking (requires auth)
//! ```

pub mod api;
pub mod auth;
pub mod booking;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/slots", get(api::slots))
        .route("/bookings", get(api::list_bookings).post(api::create_booking))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::index))
        .route("/booking", get(booking::show).post(booking::confirm))
        .route("/bookings", get(booking::list))
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}
