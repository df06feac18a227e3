//! Sign-in, sign-up and logout handlers.
//!
//! Both forms live on one page at `/`; `?panel=signup` opens the sign-up
//! panel. Failed submissions re-render the page with the first validation
//! message inline and the non-secret fields kept.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::RequestTime;
use crate::services::auth::{AuthError, SignupInput};
use crate::state::AppState;

/// Where guests land after signing in.
pub const AFTER_LOGIN_PATH: &str = "/booking";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

/// Sign-up form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Query parameters for the sign-in page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub panel: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Sign-in / sign-up page template.
#[derive(Template, WebTemplate, Default)]
#[template(path = "auth/index.html")]
pub struct AuthTemplate {
    pub show_signup: bool,
    pub login_error: Option<String>,
    pub signup_error: Option<String>,
    pub login_phone: String,
    pub signup_name: String,
    pub signup_phone: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the sign-in page, or skip it when already logged in.
pub async fn index(OptionalAuth(user): OptionalAuth, Query(query): Query<IndexQuery>) -> Response {
    if user.is_some() {
        return Redirect::to(AFTER_LOGIN_PATH).into_response();
    }

    AuthTemplate {
        show_signup: query.panel.as_deref() == Some("signup"),
        ..AuthTemplate::default()
    }
    .into_response()
}

/// Handle login form submission.
///
/// # Errors
///
/// Returns `AppError` if storage or the session store fails.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let password = SecretString::from(form.password);

    match state.auth().login(&form.phone, &password) {
        Ok(user) => start_session(&session, &user).await,
        Err(err @ (AuthError::Validation(_) | AuthError::InvalidCredentials)) => {
            let status = if matches!(err, AuthError::InvalidCredentials) {
                tracing::warn!("Login rejected: invalid credentials");
                StatusCode::UNAUTHORIZED
            } else {
                StatusCode::UNPROCESSABLE_ENTITY
            };

            let page = AuthTemplate {
                login_error: Some(err.user_message()),
                login_phone: form.phone.trim().to_string(),
                ..AuthTemplate::default()
            };
            Ok((status, page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Handle sign-up form submission.
///
/// A successful sign-up logs the guest in.
///
/// # Errors
///
/// Returns `AppError` if storage or the session store fails.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let name = form.name.trim().to_string();
    let phone = form.phone.trim().to_string();

    let input = SignupInput {
        name: form.name,
        phone: form.phone,
        password: SecretString::from(form.password),
        confirm_password: SecretString::from(form.confirm_password),
    };

    match state.auth().signup(input, RequestTime::now()).await {
        Ok(user) => start_session(&session, &user).await,
        Err(err @ (AuthError::Validation(_) | AuthError::UserAlreadyExists)) => {
            let page = AuthTemplate {
                show_signup: true,
                signup_error: Some(err.user_message()),
                signup_name: name,
                signup_phone: phone,
                ..AuthTemplate::default()
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Handle logout.
///
/// # Errors
///
/// Returns `AppError` if the session store fails.
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    tracing::info!("Guest logged out");

    Ok(Redirect::to("/"))
}

async fn start_session(session: &Session, user: &CurrentUser) -> Result<Response, AppError> {
    set_current_user(session, user).await?;
    set_sentry_user(&user.id);

    Ok(Redirect::to(AFTER_LOGIN_PATH).into_response())
}
