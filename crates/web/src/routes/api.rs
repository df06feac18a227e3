//! JSON API handlers.
//!
//! Errors are answered as `{"error": "<message>"}` with the same status codes
//! and the same hiding of internal detail as the HTML pages.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use reservations_core::Slot;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::booking::parse_date;
use crate::models::{Booking, BookingRequest};
use crate::services::RequestTime;
use crate::state::AppState;

/// `AppError` rendered as a JSON body.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E: Into<AppError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.report();
        (
            self.0.status(),
            Json(json!({ "error": self.0.public_message() })),
        )
            .into_response()
    }
}

/// Query parameters for the slots endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SlotsQuery {
    pub date: Option<String>,
}

/// Slots for one date.
#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}

/// Booking request body.
///
/// `guests` is kept as raw JSON so a non-numeric or oversized count reaches
/// validation instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateBookingBody {
    pub date: Option<String>,
    pub time: Option<String>,
    pub guests: Option<serde_json::Value>,
    pub special_requests: Option<String>,
}

impl CreateBookingBody {
    fn guests_text(&self) -> Option<String> {
        match self.guests.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(raw) => Some(raw.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Slots with simulated availability for `?date=` (default today).
///
/// # Errors
///
/// Returns 400 for a malformed date and 422 for a date outside the
/// booking window.
pub async fn slots(
    State(state): State<AppState>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, ApiError> {
    let now = RequestTime::now();

    let date = match query.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => parse_date(raw).ok_or_else(|| {
            AppError::BadRequest("Invalid date, expected YYYY-MM-DD".to_string())
        })?,
        None => now.today(),
    };

    let slots = state
        .bookings()
        .slots_for_date(date, now, &mut rand::rng())?;

    Ok(Json(SlotsResponse { date, slots }))
}

/// The logged-in guest's bookings in creation order.
///
/// # Errors
///
/// Returns `ApiError` if the booking list cannot be read.
pub async fn list_bookings(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.bookings().list_for_user(user.id)?))
}

/// Confirm a booking for the logged-in guest.
///
/// # Errors
///
/// Returns 400 for a body that is not a JSON object, 422 with the first
/// failing rule, or 500 if storage fails.
pub async fn create_booking(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<CreateBookingBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected booking body");
        AppError::BadRequest("Invalid request body, expected a JSON object".to_string())
    })?;

    let guests = body.guests_text();
    let request = BookingRequest::from_input(
        body.date.as_deref(),
        body.time.as_deref(),
        guests.as_deref(),
        body.special_requests.as_deref(),
    );

    let booking = state
        .bookings()
        .confirm(&user, request, RequestTime::now())
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use crate::services::booking::BookingError;

    use super::*;

    fn body(value: serde_json::Value) -> CreateBookingBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_guests_accepts_any_json_shape() {
        assert_eq!(body(json!({"guests": 4})).guests_text().as_deref(), Some("4"));
        assert_eq!(body(json!({"guests": "3"})).guests_text().as_deref(), Some("3"));
        assert_eq!(body(json!({"guests": 300})).guests_text().as_deref(), Some("300"));
        assert_eq!(body(json!({"guests": "abc"})).guests_text().as_deref(), Some("abc"));
        assert_eq!(body(json!({"guests": null})).guests_text(), None);
        assert_eq!(body(json!({})).guests_text(), None);
    }

    #[tokio::test]
    async fn test_api_error_is_json() {
        let err: ApiError = BookingError::Validation(
            "Please select a date and time for your reservation.".to_string(),
        )
        .into();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value["error"],
            "Please select a date and time for your reservation."
        );
    }
}
