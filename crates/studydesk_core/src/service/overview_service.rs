//! Dashboard overview: upcoming deadlines and class standings.
//!
//! # Invariants
//! - Assignments with unparseable due dates never appear as upcoming.
//! - Upcoming assignments keep their list order.

use crate::grading::{round2, weighted_total};
use crate::model::assignment::Assignment;
use crate::model::class::Class;
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Horizon of the dashboard "due soon" preview.
pub const UPCOMING_WINDOW_DAYS: u64 = 7;

/// Final grade of one class for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStanding {
    pub class_name: String,
    pub final_grade: f64,
}

/// Assignments due between `today` and `today + days`, both inclusive.
pub fn assignments_due_within<'a>(
    assignments: &'a [Assignment],
    today: NaiveDate,
    days: u64,
) -> Vec<&'a Assignment> {
    let horizon = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
    assignments
        .iter()
        .filter(|assignment| {
            assignment
                .due()
                .is_some_and(|due| due >= today && due <= horizon)
        })
        .collect()
}

/// [`assignments_due_within`] over the default seven-day window.
pub fn upcoming_assignments(assignments: &[Assignment], today: NaiveDate) -> Vec<&Assignment> {
    assignments_due_within(assignments, today, UPCOMING_WINDOW_DAYS)
}

/// Final grade of every class, in class-list order.
///
/// Each standing is the exact weighted total rounded once to two decimals,
/// which can be a hundredth or so away from the per-category rounded
/// `final_grade` shown on the class page.
pub fn class_grade_overview(classes: &[Class]) -> Vec<ClassStanding> {
    classes
        .iter()
        .map(|class| ClassStanding {
            class_name: class.class_name.clone(),
            final_grade: round2(weighted_total(&class.categories, &class.assignments)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{assignments_due_within, class_grade_overview, upcoming_assignments};
    use crate::grading::compute_class_grades;
    use crate::model::assignment::{Assignment, AssignmentDraft};
    use crate::model::class::{Category, Class, GradedAssignment};
    use chrono::NaiveDate;

    fn due(name: &str, date: &str) -> Assignment {
        Assignment::from_draft(&AssignmentDraft::new(name, "Chem", date, ""))
    }

    #[test]
    fn upcoming_window_is_inclusive_and_skips_bad_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let items = vec![
            due("yesterday", "2024-03-09"),
            due("today", "2024-03-10"),
            due("edge", "2024-03-17"),
            due("late", "2024-03-18"),
            due("unknown", "whenever"),
        ];

        let names: Vec<_> = upcoming_assignments(&items, today)
            .into_iter()
            .map(|a| a.assignment_name.as_str())
            .collect();
        assert_eq!(names, ["today", "edge"]);

        assert_eq!(assignments_due_within(&items, today, 0).len(), 1);
    }

    #[test]
    fn overview_reports_each_class_final_grade() {
        let mut chem = Class::new("Chem");
        chem.categories.push(Category::new("Labs", 100.0));
        chem.assignments.push(GradedAssignment::new("Lab", 88.0, "Labs"));
        let empty = Class::new("Art");

        let overview = class_grade_overview(&[chem, empty]);
        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].final_grade, 88.0);
        assert_eq!(overview[1].class_name, "Art");
        assert_eq!(overview[1].final_grade, 0.0);
    }

    #[test]
    fn overview_rounds_the_total_once() {
        let mut quiz = Class::new("Quiz");
        for name in ["A", "B"] {
            quiz.categories.push(Category::new(name, 10.0));
            quiz.assignments.push(GradedAssignment::new(name, 1.25, name));
        }

        assert_eq!(compute_class_grades(&quiz).final_grade, 0.26);
        assert_eq!(class_grade_overview(&[quiz])[0].final_grade, 0.25);
    }
}
