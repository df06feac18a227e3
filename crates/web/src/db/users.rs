//! User repository.

use secrecy::SecretString;

use reservations_core::UserId;

use super::{Database, RepositoryError};
use crate::models::StoredUser;
use crate::storage::keys;

/// Repository for registered guests.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All registered guests in signup order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the list cannot be read or decoded.
    pub fn list(&self) -> Result<Vec<StoredUser>, RepositoryError> {
        self.db.read_list(keys::USERS)
    }

    /// Get a guest by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the list cannot be read or decoded.
    pub fn get_by_id(&self, id: UserId) -> Result<Option<StoredUser>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|user| user.id == id))
    }

    /// Get a guest by phone number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the list cannot be read or decoded.
    pub fn get_by_phone(&self, phone: &str) -> Result<Option<StoredUser>, RepositoryError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|user| user.phone.as_str() == phone))
    }

    /// Find the guest whose phone and password both match exactly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the list cannot be read or decoded.
    pub fn find_by_credentials(
        &self,
        phone: &str,
        password: &SecretString,
    ) -> Result<Option<StoredUser>, RepositoryError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|user| user.phone.as_str() == phone && user.password_matches(password)))
    }

    /// Append a new guest.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the phone number is already
    /// registered, or another `RepositoryError` if storage fails.
    pub async fn create(&self, user: StoredUser) -> Result<StoredUser, RepositoryError> {
        let _guard = self.db.write_lock().await;

        let mut users = self.list()?;
        if users.iter().any(|existing| existing.phone == user.phone) {
            return Err(RepositoryError::Conflict(
                "phone number already registered".to_owned(),
            ));
        }

        users.push(user.clone());
        self.db.write_list(keys::USERS, &users).await?;

        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use reservations_core::Phone;

    use super::*;

    fn guest(name: &str, phone: &str) -> StoredUser {
        StoredUser::new(
            name.to_string(),
            Phone::parse(phone).unwrap(),
            &SecretString::from("secret1"),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = Database::in_memory();
        let users = db.users();

        let created = users.create(guest("An", "0911111111")).await.unwrap();

        assert_eq!(users.list().unwrap().len(), 1);
        assert_eq!(users.get_by_id(created.id).unwrap().unwrap().name, "An");
        assert!(users.get_by_phone("0911111111").unwrap().is_some());
        assert!(users.get_by_phone("0922222222").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_phone_conflicts() {
        let db = Database::in_memory();
        let users = db.users();

        users.create(guest("An", "0911111111")).await.unwrap();
        let result = users.create(guest("Binh", "0911111111")).await;

        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(users.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_credentials_must_both_match() {
        let db = Database::in_memory();
        let users = db.users();
        users.create(guest("An", "0911111111")).await.unwrap();

        let ok = SecretString::from("secret1");
        let wrong = SecretString::from("secret2");
        assert!(users.find_by_credentials("0911111111", &ok).unwrap().is_some());
        assert!(users.find_by_credentials("0911111111", &wrong).unwrap().is_none());
        assert!(users.find_by_credentials("0922222222", &ok).unwrap().is_none());
    }
}
