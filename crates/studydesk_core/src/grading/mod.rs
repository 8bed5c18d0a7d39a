//! Weighted grade calculation.
//!
//! # Responsibility
//! - Turn a class's categories and graded assignments into per-category
//!   contributions and a final percentage.
//!
//! # Invariants
//! - Pure: no storage, clock or randomness; equal inputs give equal output.
//! - Assignments referencing no existing category are ignored.
//! - A category without assignments contributes 0, it is not omitted.

mod engine;

pub use engine::{
    compute_class_grades, compute_grades, round2, weighted_total, CalculatedGrades, CategoryGrade,
};
