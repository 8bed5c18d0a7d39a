//! Repositories owning in-memory collections persisted through a store.
//!
//! # Responsibility
//! - Apply mutations to in-memory state, then write the affected records.
//! - Return typed failures instead of silently ignoring bad requests.
//!
//! # Invariants
//! - Validation and lookup failures happen before any state changes.
//! - A failed store write is logged and returned as `RepoError::Store`; the
//!   in-memory mutation is kept and stays visible through the repository.

use crate::model::ValidationError;
use crate::store::StoreError;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assignment_repo;
pub mod class_repo;
pub mod semester_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository-level failure taxonomy.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    /// A name that must be unique is already taken.
    DuplicateName { kind: &'static str, name: String },
    /// Referenced record does not exist.
    NotFound { kind: &'static str, key: String },
    IndexOutOfRange { index: usize, len: usize },
    Store(StoreError),
    /// Persisted data cannot be interpreted.
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn not_found(kind: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub(crate) fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateName { kind, name } => write!(f, "{kind} `{name}` already exists"),
            Self::NotFound { kind, key } => write!(f, "{kind} not found: {key}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of length {len}")
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::DuplicateName { .. }
            | Self::NotFound { .. }
            | Self::IndexOutOfRange { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Logs a failed write at the repository boundary and converts it.
pub(crate) fn store_failure(module: &'static str, op: &'static str, err: StoreError) -> RepoError {
    error!("event={op} module={module} status=error error={err}");
    RepoError::Store(err)
}

/// Logs a failed read and converts it; undecodable records become
/// `RepoError::InvalidData`.
pub(crate) fn load_failure(module: &'static str, err: StoreError) -> RepoError {
    error!("event=load module={module} status=error error={err}");
    match err {
        StoreError::Serialization { .. } => RepoError::InvalidData(err.to_string()),
        other => RepoError::Store(other),
    }
}
