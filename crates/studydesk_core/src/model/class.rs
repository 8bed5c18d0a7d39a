//! Grade-tracking class model.
//!
//! # Responsibility
//! - Define classes, weighted categories and graded assignments.
//! - Validate category weights and grades at the input boundary.
//!
//! # Invariants
//! - Category names are unique within their class.
//! - `GradedAssignment::category` is a name reference, not a foreign key;
//!   it may dangle after a category is removed or renamed.

use super::{require_name, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a graded assignment.
pub type GradedAssignmentId = Uuid;

/// Weighted bucket used to aggregate graded assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Percentage in `0..=100`. Weights of a class need not sum to 100.
    pub weight: f64,
}

impl Category {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("category name", &self.name)?;
        if !self.weight.is_finite() || !(0.0..=100.0).contains(&self.weight) {
            return Err(ValidationError::InvalidWeight(self.weight));
        }
        Ok(())
    }
}

/// Scored assignment counted toward one category's average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAssignment {
    /// Nil on legacy records until [`Class::assign_missing_ids`] runs.
    #[serde(default = "Uuid::nil")]
    pub id: GradedAssignmentId,
    pub assignment_name: String,
    /// Expected in `0..=100` but only required to be finite.
    pub grade: f64,
    pub category: String,
}

impl GradedAssignment {
    pub fn new(assignment_name: impl Into<String>, grade: f64, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            assignment_name: assignment_name.into(),
            grade,
            category: category.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("assignment name", &self.assignment_name)?;
        require_name("category", &self.category)?;
        if !self.grade.is_finite() {
            return Err(ValidationError::InvalidGrade(self.grade));
        }
        Ok(())
    }
}

/// Class with its grading scheme and scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub class_name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub assignments: Vec<GradedAssignment>,
}

impl Class {
    /// Empty class with no categories or scores.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            categories: Vec::new(),
            assignments: Vec::new(),
        }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    /// Replaces nil graded-assignment ids with fresh ones; returns the count.
    pub fn assign_missing_ids(&mut self) -> usize {
        let mut assigned = 0;
        for assignment in self.assignments.iter_mut().filter(|a| a.id.is_nil()) {
            assignment.id = Uuid::new_v4();
            assigned += 1;
        }
        assigned
    }

    /// Graded assignments whose category no longer exists.
    pub fn dangling_assignments(&self) -> impl Iterator<Item = &GradedAssignment> {
        self.assignments
            .iter()
            .filter(|assignment| !self.has_category(&assignment.category))
    }
}

/// Entry of the persisted `classes` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassListEntry {
    pub class_name: String,
}
