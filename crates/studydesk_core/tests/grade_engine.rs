use studydesk_core::{compute_grades, Category, GradedAssignment};

fn weighted_average(categories: &[Category], assignments: &[GradedAssignment]) -> f64 {
    categories
        .iter()
        .map(|category| {
            let grades: Vec<f64> = assignments
                .iter()
                .filter(|a| a.category == category.name)
                .map(|a| a.grade)
                .collect();
            let average = if grades.is_empty() {
                0.0
            } else {
                grades.iter().sum::<f64>() / grades.len() as f64
            };
            average * category.weight / 100.0
        })
        .sum()
}

#[test]
fn final_grade_matches_weighted_average_within_rounding() {
    let cases: Vec<(Vec<Category>, Vec<GradedAssignment>)> = vec![
        (
            vec![Category::new("Homework", 40.0), Category::new("Exams", 60.0)],
            vec![
                GradedAssignment::new("HW1", 83.0, "Homework"),
                GradedAssignment::new("HW2", 91.7, "Homework"),
                GradedAssignment::new("HW3", 77.3, "Homework"),
                GradedAssignment::new("Midterm", 68.9, "Exams"),
                GradedAssignment::new("Final", 88.45, "Exams"),
            ],
        ),
        (
            vec![
                Category::new("Labs", 15.0),
                Category::new("Quizzes", 25.0),
                Category::new("Projects", 35.0),
                Category::new("Final", 25.0),
            ],
            vec![
                GradedAssignment::new("L1", 99.9, "Labs"),
                GradedAssignment::new("Q1", 66.67, "Quizzes"),
                GradedAssignment::new("Q2", 70.01, "Quizzes"),
                GradedAssignment::new("P1", 81.234, "Projects"),
                GradedAssignment::new("F", 79.999, "Final"),
            ],
        ),
    ];

    for (categories, assignments) in cases {
        let result = compute_grades(&categories, &assignments);
        let exact = weighted_average(&categories, &assignments);
        // Per-category rounding can drift by half a cent per category.
        let tolerance = 0.005 * (categories.len() as f64 + 1.0);
        assert!(
            (result.final_grade - exact).abs() <= tolerance,
            "final {} vs exact {exact}",
            result.final_grade
        );
    }
}

#[test]
fn repeated_calls_are_identical() {
    let categories = [Category::new("Essays", 70.0), Category::new("Participation", 30.0)];
    let assignments = [
        GradedAssignment::new("E1", 88.0, "Essays"),
        GradedAssignment::new("P", 100.0, "Participation"),
    ];
    assert_eq!(
        compute_grades(&categories, &assignments),
        compute_grades(&categories, &assignments)
    );
}
