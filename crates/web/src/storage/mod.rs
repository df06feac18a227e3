//! Key/value storage for guests and bookings.
//!
//! Every persisted collection is a JSON document stored under a well-known
//! string key, the same shape a browser's `localStorage` would hold. Two
//! backends exist:
//!
//! - [`MemoryStore`] - process-local map, used in tests and when no data file
//!   is configured
//! - [`FileStore`] - a single JSON object on disk, rewritten on every write
//!
//! Reads of a missing key return `None`; callers treat that as an empty list.
//! Writes are last-writer-wins; see [`crate::db::Database`] for the lock that
//! serializes read-modify-write cycles.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage keys for persisted collections.
pub mod keys {
    /// Key holding the JSON array of registered guests.
    pub const USERS: &str = "restaurant_users";

    /// Key holding the JSON array of confirmed bookings.
    pub const BOOKINGS: &str = "restaurant_bookings";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A thread panicked while holding the storage lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string key/value store.
///
/// Implementations must be safe to share across request handlers.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
