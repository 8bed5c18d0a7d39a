//! String-keyed persistence boundary.
//!
//! # Responsibility
//! - Define the get/set/remove contract every repository persists through.
//! - Own the key naming scheme and JSON encoding of stored records.
//!
//! # Invariants
//! - Values are opaque strings; the store never inspects or validates them.
//! - `get` of a missing key is `Ok(None)`, never an error.
//! - `remove` of a missing key succeeds.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a store backend or by record encoding.
#[derive(Debug)]
pub enum StoreError {
    /// Backend rejected the operation.
    Backend {
        op: &'static str,
        key: String,
        message: String,
    },
    /// Record could not be encoded to, or decoded from, JSON.
    Serialization { key: String, source: serde_json::Error },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend { op, key, message } => {
                write!(f, "store {op} failed for key `{key}`: {message}")
            }
            Self::Serialization { key, source } => {
                write!(f, "invalid JSON record under key `{key}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend { .. } => None,
            Self::Serialization { source, .. } => Some(source),
        }
    }
}

/// Opaque string-keyed persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// Key names used by the persisted layout.
pub mod keys {
    pub const SEMESTERS: &str = "semesters";
    pub const CLASSES: &str = "classes";
    pub const SORT_BY: &str = "sortBy";
    pub const STOPWATCH_TIME: &str = "stopwatchTime";
    pub const TIMER_TIME: &str = "timerTime";

    pub fn todo_assignments(semester_id: &str) -> String {
        format!("assignments_{semester_id}")
    }

    pub fn completed_assignments(semester_id: &str) -> String {
        format!("completedAssignments_{semester_id}")
    }

    pub fn class_data(class_name: &str) -> String {
        format!("classData_{class_name}")
    }
}

/// Reads and decodes the JSON record under `key`.
pub fn load_json<T, S>(store: &S, key: &str) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Serialization {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and writes it under `key`.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}
