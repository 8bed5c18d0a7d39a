//! Core domain logic for StudyDesk: semester todo tracking, weighted grade
//! calculation and study timers over a string key-value store.

pub mod config;
pub mod db;
pub mod grading;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod timer;

pub use config::{bootstrap, BootstrapError, CoreConfig};
pub use grading::{compute_class_grades, compute_grades, CalculatedGrades, CategoryGrade};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::assignment::{Assignment, AssignmentDraft, AssignmentId, ListKind, SortKey};
pub use model::class::{Category, Class, GradedAssignment, GradedAssignmentId};
pub use model::semester::Semester;
pub use model::ValidationError;
pub use repo::assignment_repo::{AssignmentBatch, AssignmentBoard, AssignmentRepository};
pub use repo::class_repo::{ClassRepository, ClassSnapshot, GradedAssignmentInput};
pub use repo::semester_repo::SemesterRepository;
pub use repo::{RepoError, RepoResult};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
