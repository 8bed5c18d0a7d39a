use crate::model::class::{Category, Class, GradedAssignment};
use serde::Serialize;

/// Weighted contribution of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGrade {
    pub category: String,
    /// `average * weight / 100`, rounded to two decimals.
    pub grade: f64,
}

/// Derived grades for a class. Never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedGrades {
    /// One entry per category, in category order.
    pub grades: Vec<CategoryGrade>,
    /// Sum of the rounded contributions, rounded again.
    pub final_grade: f64,
}

/// Computes per-category contributions and the final grade.
///
/// Each contribution is rounded to two decimals before summing and the sum
/// is rounded once more, so the final grade can differ from rounding the
/// exact weighted sum by a few hundredths.
pub fn compute_grades(categories: &[Category], assignments: &[GradedAssignment]) -> CalculatedGrades {
    let grades: Vec<CategoryGrade> = categories
        .iter()
        .map(|category| CategoryGrade {
            category: category.name.clone(),
            grade: round2(category_average(&category.name, assignments) * category.weight / 100.0),
        })
        .collect();

    let final_grade = round2(grades.iter().map(|entry| entry.grade).sum());

    CalculatedGrades {
        grades,
        final_grade,
    }
}

/// [`compute_grades`] over a class snapshot.
pub fn compute_class_grades(class: &Class) -> CalculatedGrades {
    compute_grades(&class.categories, &class.assignments)
}

/// Exact weighted sum over existing categories, with no rounding.
///
/// Dashboard totals round this once instead of rounding per category, so
/// they can differ from [`CalculatedGrades::final_grade`] by a few
/// hundredths.
pub fn weighted_total(categories: &[Category], assignments: &[GradedAssignment]) -> f64 {
    categories
        .iter()
        .map(|category| category_average(&category.name, assignments) * category.weight / 100.0)
        .sum()
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn category_average(name: &str, assignments: &[GradedAssignment]) -> f64 {
    let (sum, count) = assignments
        .iter()
        .filter(|assignment| assignment.category == name)
        .fold((0.0, 0usize), |(sum, count), assignment| {
            (sum + assignment.grade, count + 1)
        });

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
