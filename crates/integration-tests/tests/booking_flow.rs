//! Booking through the HTML forms.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use regex::Regex;

use reservations_integration_tests::{TestContext, tomorrow};

async fn logged_in() -> TestContext {
    let mut ctx = TestContext::new();
    ctx.signup("Minh", "0901234567", "secret1").await;
    ctx
}

#[tokio::test]
async fn test_booking_page_lists_all_slots() {
    let mut ctx = logged_in().await;
    let date = tomorrow().format("%Y-%m-%d").to_string();

    let response = ctx.get(&format!("/booking?date={date}")).await;

    assert_eq!(response.status, StatusCode::OK);
    for label in [
        "10:30 AM", "12:00 PM", "1:30 PM", "3:00 PM", "4:30 PM", "6:00 PM", "7:30 PM", "9:00 PM",
        "10:30 PM",
    ] {
        assert!(response.body.contains(label), "missing {label}");
    }
    assert!(response.body.contains(&format!("value=\"{date}\"")));
}

#[tokio::test]
async fn test_booking_page_out_of_window_falls_back_to_today() {
    let mut ctx = logged_in().await;

    let response = ctx.get("/booking?date=1999-01-01").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Please choose a date between today and 30 days from now."));
}

#[tokio::test]
async fn test_confirm_appends_exactly_one_booking() {
    let mut ctx = logged_in().await;
    let date = tomorrow().format("%Y-%m-%d").to_string();

    let response = ctx
        .post_form(
            "/booking",
            &[
                ("date", date.as_str()),
                ("time", "19:30"),
                ("guests", "4"),
                ("special_requests", "Window seat"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Booking confirmed"));
    assert!(response.body.contains("at 7:30 PM"));
    assert!(response.body.contains("4 guests"));

    let bookings = ctx.db().bookings().list().unwrap();
    assert_eq!(bookings.len(), 1);

    let code = Regex::new(r"^GF\d{6}$").unwrap();
    let booking = &bookings[0];
    assert!(code.is_match(booking.confirmation_number.as_str()));
    assert!(response.body.contains(booking.confirmation_number.as_str()));
    assert_eq!(booking.date, tomorrow());
    assert_eq!(booking.guests, 4);
    assert_eq!(booking.special_requests, "Window seat");
    assert_eq!(booking.user_name, "Minh");
}

#[tokio::test]
async fn test_confirm_without_time_is_rejected() {
    let mut ctx = logged_in().await;
    let date = tomorrow().format("%Y-%m-%d").to_string();

    let response = ctx
        .post_form("/booking", &[("date", date.as_str()), ("guests", "2")])
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Please select a date and time for your reservation."));
    assert!(ctx.db().bookings().list().unwrap().is_empty());
}

#[tokio::test]
async fn test_confirm_rejects_non_numeric_guests_inline() {
    let mut ctx = logged_in().await;
    let date = tomorrow().format("%Y-%m-%d").to_string();

    for guests in ["abc", "300"] {
        let response = ctx
            .post_form(
                "/booking",
                &[("date", date.as_str()), ("time", "12:00"), ("guests", guests)],
            )
            .await;

        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.body.contains("Guest count must be between 1 and 10."));
    }
    assert!(ctx.db().bookings().list().unwrap().is_empty());
}

#[tokio::test]
async fn test_confirm_rejects_unknown_time() {
    let mut ctx = logged_in().await;
    let date = tomorrow().format("%Y-%m-%d").to_string();

    let response = ctx
        .post_form(
            "/booking",
            &[("date", date.as_str()), ("time", "11:00"), ("guests", "2")],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(ctx.db().bookings().list().unwrap().is_empty());
}

#[tokio::test]
async fn test_reservations_page_lists_own_bookings() {
    let mut ctx = logged_in().await;
    let date = tomorrow().format("%Y-%m-%d").to_string();
    ctx.post_form(
        "/booking",
        &[("date", date.as_str()), ("time", "12:00"), ("guests", "1")],
    )
    .await;

    let mut other = ctx.new_browser();
    other.signup("Lan", "0907654321", "secret2").await;

    let response = ctx.get("/bookings").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("12:00 PM"));
    assert!(response.body.contains("1 guest"));

    let response = other.get("/bookings").await;
    assert!(response.body.contains("You have no reservations yet."));
}
