//! Durable storage boundary.
//!
//! # Responsibility
//! - Define the key-value contract the persistence gateway writes through.
//! - Isolate SQLite details from schema and orchestration code.
//!
//! # Invariants
//! - [`StorageBackend::set`] is atomic: after a failed write the previous
//!   value is still intact, byte for byte.
//! - Exactly one well-known key holds the canonical state blob.
//!
//! # See also
//! - docs/architecture/persistence.md

pub mod gateway;
pub mod sqlite;

pub use gateway::{PersistenceGateway, STATE_STORAGE_KEY};
pub use sqlite::SqliteStorage;

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport-level failure of the durable key-value slot.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// Non-SQLite backend failure (poisoned lock, injected test fault,
    /// quota exhaustion).
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Backend(detail) => write!(f, "storage backend failure: {detail}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Key-value primitive the gateway is injected with.
///
/// Implementations must make `set` all-or-nothing: a failed write leaves the
/// slot exactly as it was.
pub trait StorageBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// In-process backend for tests and throwaway sessions.
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Backend("memory slots lock poisoned".to_string()))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Backend("memory slots lock poisoned".to_string()))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Backend("memory slots lock poisoned".to_string()))?;
        slots.remove(key);
        Ok(())
    }
}
