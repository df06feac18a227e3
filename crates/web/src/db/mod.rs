//! Typed repositories over the key/value store.
//!
//! # Collections
//!
//! - `restaurant_users` - Registered guests ([`users::UserRepository`])
//! - `restaurant_bookings` - Confirmed bookings ([`bookings::BookingRepository`])
//!
//! Each collection is a JSON array under one key. A missing key reads as an
//! empty array; a key holding something other than a valid array is reported
//! as `RepositoryError::DataCorruption` rather than silently reset.

pub mod bookings;
pub mod users;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

pub use bookings::BookingRepository;
pub use users::UserRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stored data could not be decoded.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A uniqueness constraint would be violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The blocking write task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Handle to the backing store shared by all repositories.
///
/// Cheap to clone. Writers hold [`Database::write_lock`] across their
/// read-modify-write cycle so concurrent appends cannot drop each other.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl Database {
    /// Wrap an existing store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A fresh, empty in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Open a file-backed database.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be read or parsed.
    pub fn open_file(path: &std::path::Path) -> Result<Self, StorageError> {
        Ok(Self::new(Arc::new(FileStore::open(path)?)))
    }

    /// Repository for registered guests.
    #[must_use]
    pub const fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self)
    }

    /// Repository for bookings.
    #[must_use]
    pub const fn bookings(&self) -> BookingRepository<'_> {
        BookingRepository::new(self)
    }

    /// Check the store can be read. Used by the readiness probe.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub fn ping(&self) -> Result<(), StorageError> {
        self.store.get(crate::storage::keys::USERS).map(|_| ())
    }

    async fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, RepositoryError> {
        match self.store.get(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid JSON under {key}: {e}"))
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Encode and store a list. The store write may touch the disk, so it
    /// runs on the blocking pool.
    async fn write_list<T: Serialize>(
        &self,
        key: &str,
        items: &[T],
    ) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(items).map_err(|e| {
            RepositoryError::DataCorruption(format!("cannot encode {key}: {e}"))
        })?;

        let store = Arc::clone(&self.store);
        let key = key.to_owned();
        tokio::task::spawn_blocking(move || store.set(&key, &raw)).await??;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::keys;

    #[test]
    fn test_missing_key_reads_empty() {
        let db = Database::in_memory();
        let items: Vec<u32> = db.read_list(keys::BOOKINGS).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_garbage_is_data_corruption() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::USERS, "{not an array").unwrap();
        let db = Database::new(store);

        let result: Result<Vec<u32>, _> = db.read_list(keys::USERS);
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let db = Database::in_memory();
        db.write_list(keys::BOOKINGS, &[1u32, 2, 3]).await.unwrap();
        let items: Vec<u32> = db.read_list(keys::BOOKINGS).unwrap();
        assert_eq!(items, [1, 2, 3]);
    }
}
