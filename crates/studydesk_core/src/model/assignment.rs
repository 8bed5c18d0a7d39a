//! Todo-tracker assignment model.
//!
//! # Responsibility
//! - Define the assignment record stored in a semester's todo/completed lists.
//! - Own the ordering rules behind the list sort options.
//!
//! # Invariants
//! - `id` is unique across both lists of a semester.
//! - `due_date` is stored verbatim; it is only parsed for ordering/filters.
//! - Sorting is stable and total: unparseable dates order after valid ones.

use super::{require_name, ValidationError};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid color regex"));

/// Stable identifier of a todo-tracker assignment.
pub type AssignmentId = Uuid;

/// Color used when a draft leaves it blank.
pub const DEFAULT_COLOR: &str = "#000000";

/// Assignment tracked in a semester's todo or completed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Nil for records persisted before ids existed, until
    /// [`assign_missing_ids`] replaces it.
    #[serde(default = "Uuid::nil")]
    pub id: AssignmentId,
    pub assignment_name: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Assignment {
    /// Creates an assignment with a fresh id from a validated draft.
    pub fn from_draft(draft: &AssignmentDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Builds an assignment that keeps an existing id (in-place edits).
    pub fn with_id(id: AssignmentId, draft: &AssignmentDraft) -> Self {
        Self {
            id,
            assignment_name: draft.assignment_name.trim().to_string(),
            class_name: draft.class_name.trim().to_string(),
            due_date: draft.due_date.trim().to_string(),
            color: draft.effective_color().to_string(),
        }
    }

    /// Due date parsed as a calendar date, if it is parseable.
    pub fn due(&self) -> Option<NaiveDate> {
        parse_due_date(&self.due_date)
    }
}

/// Gives every nil-id record a fresh id; returns how many changed.
pub fn assign_missing_ids(assignments: &mut [Assignment]) -> usize {
    let mut assigned = 0;
    for assignment in assignments.iter_mut().filter(|a| a.id.is_nil()) {
        assignment.id = Uuid::new_v4();
        assigned += 1;
    }
    assigned
}

/// User input for creating or replacing an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentDraft {
    pub assignment_name: String,
    pub class_name: String,
    pub due_date: String,
    /// Empty means [`DEFAULT_COLOR`].
    pub color: String,
}

impl AssignmentDraft {
    pub fn new(
        assignment_name: impl Into<String>,
        class_name: impl Into<String>,
        due_date: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            assignment_name: assignment_name.into(),
            class_name: class_name.into(),
            due_date: due_date.into(),
            color: color.into(),
        }
    }

    /// Checks required fields and the color format.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("assignment name", &self.assignment_name)?;
        let color = self.effective_color();
        if !HEX_COLOR_RE.is_match(color) {
            return Err(ValidationError::InvalidColor(color.to_string()));
        }
        Ok(())
    }

    fn effective_color(&self) -> &str {
        let trimmed = self.color.trim();
        if trimmed.is_empty() {
            DEFAULT_COLOR
        } else {
            trimmed
        }
    }
}

/// Which of the two semester lists an assignment lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Todo,
    Completed,
}

impl Display for ListKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Ordering options offered for the assignment lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    DueDateAsc,
    DueDateDesc,
    ClassNameAsc,
    ClassNameDesc,
}

impl SortKey {
    /// Persisted form written under the `sortBy` key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DueDateAsc => "dueDate-asc",
            Self::DueDateDesc => "dueDate-desc",
            Self::ClassNameAsc => "className-asc",
            Self::ClassNameDesc => "className-desc",
        }
    }

    /// Compares two assignments under this key.
    pub fn compare(self, a: &Assignment, b: &Assignment) -> Ordering {
        match self {
            Self::DueDateAsc => compare_due(a.due(), b.due(), false),
            Self::DueDateDesc => compare_due(a.due(), b.due(), true),
            Self::ClassNameAsc => compare_class_names(&a.class_name, &b.class_name),
            Self::ClassNameDesc => compare_class_names(&b.class_name, &a.class_name),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// Accepts the current names and the older `dueDate`/`dueDateB`/
    /// `classNameAtoZ`/`classNameZtoA` values.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "dueDate-asc" | "dueDate" => Ok(Self::DueDateAsc),
            "dueDate-desc" | "dueDateB" => Ok(Self::DueDateDesc),
            "className-asc" | "classNameAtoZ" => Ok(Self::ClassNameAsc),
            "className-desc" | "classNameZtoA" => Ok(Self::ClassNameDesc),
            other => Err(format!("unknown sort key `{other}`")),
        }
    }
}

/// Stable in-place sort of `items` by `key`.
pub fn sort_assignments(items: &mut [Assignment], key: SortKey) {
    items.sort_by(|a, b| key.compare(a, b));
}

/// Parses `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM[:SS]` timestamp, or RFC 3339.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|stamp| stamp.date())
}

fn compare_due(a: Option<NaiveDate>, b: Option<NaiveDate>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// Case-insensitive first so "art" and "Art" sit together, exact text breaks ties.
fn compare_class_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
