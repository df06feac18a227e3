//! Booking page, confirmation and reservation list handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use reservations_core::Slot;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::booking::parse_date;
use crate::models::{Booking, BookingRequest, CurrentUser};
use crate::services::RequestTime;
use crate::services::booking::{BookingError, MAX_GUESTS, MIN_GUESTS, messages};
use crate::state::AppState;

/// Date format used by the date picker and query strings.
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Form Types
// =============================================================================

/// Query parameters for the booking page.
#[derive(Debug, Default, Deserialize)]
pub struct BookingQuery {
    pub date: Option<String>,
}

/// Booking form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookingForm {
    pub date: Option<String>,
    pub time: Option<String>,
    pub guests: Option<String>,
    pub special_requests: Option<String>,
}

impl BookingForm {
    fn to_request(&self) -> BookingRequest {
        BookingRequest::from_input(
            self.date.as_deref(),
            self.time.as_deref(),
            self.guests.as_deref(),
            self.special_requests.as_deref(),
        )
    }
}

// =============================================================================
// View Types
// =============================================================================

/// A slot as rendered in the time picker.
#[derive(Debug, Clone)]
pub struct SlotView {
    /// `HH:MM`, submitted as the form value.
    pub value: String,
    pub display: String,
    pub available: bool,
    /// Tooltip explaining why the slot cannot be picked.
    pub title: String,
    pub checked: bool,
}

impl SlotView {
    fn from_slot(slot: &Slot, selected: Option<NaiveTime>) -> Self {
        Self {
            value: slot.time_label(),
            display: slot.display.clone(),
            available: slot.available,
            title: slot
                .reason
                .map(|reason| reason.description().to_string())
                .unwrap_or_default(),
            checked: slot.available && selected == Some(slot.time),
        }
    }
}

/// One entry of the party-size selector.
#[derive(Debug, Clone)]
pub struct GuestOption {
    pub value: u8,
    pub selected: bool,
}

/// A stored booking as rendered in the reservations list.
#[derive(Debug, Clone)]
pub struct BookingView {
    pub confirmation_number: String,
    pub date: String,
    pub display_time: String,
    pub guests: u8,
    pub special_requests: String,
    pub status: String,
}

impl From<&Booking> for BookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            confirmation_number: booking.confirmation_number.to_string(),
            date: filters::short_date(booking.date),
            display_time: booking.display_time.clone(),
            guests: booking.guests,
            special_requests: booking.special_requests.clone(),
            status: booking.status.to_string(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Booking page template.
#[derive(Template, WebTemplate)]
#[template(path = "booking/index.html")]
pub struct BookingTemplate {
    pub user_name: String,
    pub date: String,
    pub min_date: String,
    pub max_date: String,
    pub slots: Vec<SlotView>,
    pub guest_options: Vec<GuestOption>,
    pub special_requests: String,
    pub error: Option<String>,
}

/// Confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "booking/confirmation.html")]
pub struct ConfirmationTemplate {
    pub user_name: String,
    pub confirmation_number: String,
    pub when: String,
    pub guests: u8,
    pub special_requests: String,
}

/// Reservation list template.
#[derive(Template, WebTemplate)]
#[template(path = "booking/list.html")]
pub struct BookingListTemplate {
    pub user_name: String,
    pub bookings: Vec<BookingView>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the booking page for `?date=` (default today).
///
/// Availability is re-simulated on every load.
///
/// # Errors
///
/// Returns `AppError` if the page cannot be built.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<BookingQuery>,
) -> Result<BookingTemplate, AppError> {
    let now = RequestTime::now();
    let requested = query
        .date
        .as_deref()
        .filter(|date| !date.trim().is_empty())
        .map(parse_date);

    let (date, error) = match requested {
        Some(Some(date)) if state.schedule().is_bookable_date(date, now.today()) => (date, None),
        Some(_) => (
            now.today(),
            Some(messages::date_out_of_range(
                state.schedule().booking_window_days(),
            )),
        ),
        None => (now.today(), None),
    };

    let mut page = booking_page(&state, &user, date, now, &BookingForm::default())?;
    page.error = error;
    Ok(page)
}

/// Handle booking form submission.
///
/// Renders the confirmation on success. A rejected request re-renders the
/// booking page with the message inline and the selection kept.
///
/// # Errors
///
/// Returns `AppError` if storage fails.
pub async fn confirm(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<BookingForm>,
) -> Result<Response, AppError> {
    let now = RequestTime::now();

    match state.bookings().confirm(&user, form.to_request(), now).await {
        Ok(booking) => Ok(ConfirmationTemplate {
            user_name: user.name,
            confirmation_number: booking.confirmation_number.to_string(),
            when: filters::long_date_time(booking.date, booking.time),
            guests: booking.guests,
            special_requests: booking.special_requests,
        }
        .into_response()),
        Err(BookingError::Validation(message)) => {
            let date = form
                .date
                .as_deref()
                .and_then(parse_date)
                .filter(|date| state.schedule().is_bookable_date(*date, now.today()))
                .unwrap_or_else(|| now.today());

            let mut page = booking_page(&state, &user, date, now, &form)?;
            page.error = Some(message);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Display the guest's reservations, newest first.
///
/// # Errors
///
/// Returns `AppError` if the booking list cannot be read.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<BookingListTemplate, AppError> {
    let bookings = state.bookings().list_for_user(user.id)?;

    Ok(BookingListTemplate {
        user_name: user.name,
        bookings: bookings.iter().rev().map(BookingView::from).collect(),
    })
}

fn booking_page(
    state: &AppState,
    user: &CurrentUser,
    date: NaiveDate,
    now: RequestTime,
    form: &BookingForm,
) -> Result<BookingTemplate, AppError> {
    let request = form.to_request();
    let slots = state
        .bookings()
        .slots_for_date(date, now, &mut rand::rng())?;

    let today = now.today();

    Ok(BookingTemplate {
        user_name: user.name.clone(),
        date: date.format(DATE_INPUT_FORMAT).to_string(),
        min_date: today.format(DATE_INPUT_FORMAT).to_string(),
        max_date: state
            .schedule()
            .last_bookable_date(today)
            .format(DATE_INPUT_FORMAT)
            .to_string(),
        slots: slots
            .iter()
            .map(|slot| SlotView::from_slot(slot, request.time))
            .collect(),
        guest_options: (MIN_GUESTS..=MAX_GUESTS)
            .map(|value| GuestOption {
                value,
                selected: value == request.guests,
            })
            .collect(),
        special_requests: request.special_requests,
        error: None,
    })
}
