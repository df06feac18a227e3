//! Integration test harness for the reservation site.
//!
//! [`TestContext`] builds the full router over an in-memory (or file-backed)
//! database and drives it in-process with `tower::ServiceExt::oneshot`,
//! carrying the session cookie between requests the way a browser would.
//!
//! ```rust,ignore
//! let mut ctx = TestContext::new();
//! let response = ctx.signup("Minh", "0901234567", "secret1").await;
//! assert_eq!(response.status, StatusCode::SEE_OTHER);
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use chrono::{Local, NaiveDate, TimeDelta};
use tower::ServiceExt;

use reservations_web::config::ReservationsConfig;
use reservations_web::db::Database;
use reservations_web::middleware::session::SESSION_COOKIE_NAME;
use reservations_web::state::AppState;

/// A response with its body read into memory.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// One browser talking to one running site.
pub struct TestContext {
    app: Router,
    db: Database,
    cookie: Option<String>,
}

impl TestContext {
    /// A site backed by an empty in-memory database.
    #[must_use]
    pub fn new() -> Self {
        Self::with_database(Database::in_memory())
    }

    /// A site backed by the given database.
    #[must_use]
    pub fn with_database(db: Database) -> Self {
        let config = ReservationsConfig::from_lookup(|_| None).unwrap();
        let state = AppState::new(config, db.clone());

        Self {
            app: reservations_web::app(state),
            db,
            cookie: None,
        }
    }

    /// A second browser on the same site: shared data, no session cookie.
    #[must_use]
    pub fn new_browser(&self) -> Self {
        Self {
            app: self.app.clone(),
            db: self.db.clone(),
            cookie: None,
        }
    }

    /// The database behind the site.
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Whether this browser currently holds a session cookie.
    #[must_use]
    pub const fn has_cookie(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request(Method::GET, uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = self
            .request(Method::POST, uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&mut self, uri: &str, json: &serde_json::Value) -> TestResponse {
        let request = self
            .request(Method::POST, uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn signup(&mut self, name: &str, phone: &str, password: &str) -> TestResponse {
        self.post_form(
            "/auth/signup",
            &[
                ("name", name),
                ("phone", phone),
                ("password", password),
                ("confirm_password", password),
            ],
        )
        .await
    }

    pub async fn login(&mut self, phone: &str, password: &str) -> TestResponse {
        self.post_form("/auth/login", &[("phone", phone), ("password", password)])
            .await
    }

    pub async fn logout(&mut self) -> TestResponse {
        self.post_form("/auth/logout", &[]).await
    }

    fn request(&self, method: Method, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();

        if let Some(cookie) = session_cookie(&headers) {
            self.cookie = Some(cookie);
        }

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// `name=value` of the session cookie set by a response, if any.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .map(str::to_string)
}

/// Tomorrow's date on the local clock, always inside the booking window.
#[must_use]
pub fn tomorrow() -> NaiveDate {
    Local::now().date_naive() + TimeDelta::days(1)
}
