//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more form fields failed validation, in display order.
    #[error("{}", .0.first().map_or("invalid input", String::as_str))]
    Validation(Vec<String>),

    /// No stored guest matches the phone and password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The phone number is already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

impl AuthError {
    /// Message to show inline on the form.
    ///
    /// For validation failures this is the first collected message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors
                .first()
                .cloned()
                .unwrap_or_else(|| "Please check the form and try again".to_owned()),
            Self::InvalidCredentials => super::messages::INVALID_CREDENTIALS.to_owned(),
            Self::UserAlreadyExists => super::messages::PHONE_TAKEN.to_owned(),
            Self::Repository(_) => "Something went wrong, please try again".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_first_message() {
        let err = AuthError::Validation(vec!["first".to_owned(), "second".to_owned()]);
        assert_eq!(err.to_string(), "first");
        assert_eq!(err.user_message(), "first");
    }

    #[test]
    fn test_credentials_message() {
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "Invalid phone number or password"
        );
    }
}
