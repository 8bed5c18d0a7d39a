//! Semester record.

use serde::{Deserialize, Serialize};

/// Named container scoping one todo/completed tracker.
///
/// `id` is the creation time in epoch milliseconds, kept as a string to
/// match the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: String,
    pub name: String,
}
