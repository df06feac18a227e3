//! Authentication service.
//!
//! Sign-up and login against the stored guest list. Guests log in with their
//! phone number and a plaintext password; a successful sign-up logs the guest
//! in straight away.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};

use reservations_core::Phone;

use crate::db::{Database, RepositoryError, UserRepository};
use crate::models::{CurrentUser, StoredUser};
use crate::services::RequestTime;

/// Minimum display name length (after trimming).
const MIN_NAME_LENGTH: usize = 2;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Inline form messages, in the order they are collected.
pub mod messages {
    pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters long";
    pub const INVALID_PHONE: &str = "Please enter a valid phone number";
    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
    pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
    pub const PHONE_TAKEN: &str = "Phone number already registered";
    pub const PHONE_REQUIRED: &str = "Phone number is required";
    pub const PASSWORD_REQUIRED: &str = "Password is required";
    pub const INVALID_CREDENTIALS: &str = "Invalid phone number or password";
}

/// Sign-up form input.
#[derive(Debug)]
pub struct SignupInput {
    pub name: String,
    pub phone: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            users: UserRepository::new(db),
        }
    }

    /// Collect every sign-up validation failure, in display order.
    ///
    /// An empty list means the input is acceptable.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the guest list cannot be read.
    pub fn validate_signup(&self, input: &SignupInput) -> Result<Vec<String>, AuthError> {
        let mut errors = Vec::new();

        if input.name.trim().chars().count() < MIN_NAME_LENGTH {
            errors.push(messages::NAME_TOO_SHORT.to_owned());
        }

        if Phone::parse(&input.phone).is_err() {
            errors.push(messages::INVALID_PHONE.to_owned());
        }

        let password = input.password.expose_secret();
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(messages::PASSWORD_TOO_SHORT.to_owned());
        }

        if password != input.confirm_password.expose_secret() {
            errors.push(messages::PASSWORD_MISMATCH.to_owned());
        }

        if self.users.get_by_phone(input.phone.trim())?.is_some() {
            errors.push(messages::PHONE_TAKEN.to_owned());
        }

        Ok(errors)
    }

    /// Register a new guest and return their session record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` with every failing rule, or
    /// `AuthError::UserAlreadyExists` if the phone was registered concurrently.
    pub async fn signup(
        &self,
        input: SignupInput,
        now: RequestTime,
    ) -> Result<CurrentUser, AuthError> {
        let errors = self.validate_signup(&input)?;
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let phone = Phone::parse(&input.phone)
            .map_err(|_| AuthError::Validation(vec![messages::INVALID_PHONE.to_owned()]))?;

        let user = StoredUser::new(
            input.name.trim().to_owned(),
            phone,
            &input.password,
            now.utc,
        );

        let user = self.users.create(user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })?;

        tracing::info!(user_id = %user.id, "Guest signed up");

        Ok(user.to_session())
    }

    /// Log in with phone and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if a field is blank and
    /// `AuthError::InvalidCredentials` if no guest matches exactly.
    pub fn login(&self, phone: &str, password: &SecretString) -> Result<CurrentUser, AuthError> {
        let errors = validate_login(phone, password);
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let user = self
            .users
            .find_by_credentials(phone.trim(), password)?
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::info!(user_id = %user.id, "Guest logged in");

        Ok(user.to_session())
    }
}

/// Collect login validation failures, in display order.
#[must_use]
pub fn validate_login(phone: &str, password: &SecretString) -> Vec<String> {
    let mut errors = Vec::new();

    if phone.trim().is_empty() {
        errors.push(messages::PHONE_REQUIRED.to_owned());
    }

    if password.expose_secret().is_empty() {
        errors.push(messages::PASSWORD_REQUIRED.to_owned());
    }

    errors
}
