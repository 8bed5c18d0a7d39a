//! Domain records for semesters, todo assignments and graded classes.
//!
//! # Responsibility
//! - Define the persisted shapes (camelCase JSON) shared by repositories.
//! - Validate user input before a repository mutates anything.
//!
//! # Invariants
//! - Todo assignments and graded assignments carry stable UUIDs.
//! - Names are compared exactly; uniqueness is enforced by repositories.

pub mod assignment;
pub mod class;
pub mod semester;
mod validation;

pub use validation::ValidationError;

pub(crate) use validation::require_name;
