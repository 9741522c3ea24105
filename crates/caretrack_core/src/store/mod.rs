//! Key-value storage seam for the notification slot.
//!
//! # Responsibility
//! - Define the get/set contract the repository persists through.
//! - Provide an in-memory implementation for tests and previews.
//!
//! # Invariants
//! - A key that was never written reads as `None`, not as an error.
//! - `set` replaces the whole slot value; there are no partial writes.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

mod sqlite_store;

pub use sqlite_store::SqliteKeyValueStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while talking to the underlying storage backend.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String-keyed slot storage.
///
/// The production backend is a SQLite table; tests inject an in-memory
/// map or a failing double. Implementations take `&self` so one store can
/// be shared between a repository and a test asserting on raw contents.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, `None` when never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the entire value stored under `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory store used by tests and UI previews. Never fails.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
