use studydesk_core::{
    AssignmentBatch, AssignmentDraft, AssignmentRepository, KeyValueStore, ListKind, MemoryStore,
    RepoError, SortKey, ValidationError,
};

const SEMESTER: &str = "1714000000000";

fn draft(name: &str, class_name: &str, due_date: &str) -> AssignmentDraft {
    AssignmentDraft::new(name, class_name, due_date, "#4b0082")
}

fn add_one(repo: &mut AssignmentRepository<&MemoryStore>, d: AssignmentDraft) {
    repo.add_assignments(AssignmentBatch::Repeat { draft: d, times: 1 })
        .unwrap();
}

fn names(list: &[studydesk_core::Assignment]) -> Vec<&str> {
    list.iter().map(|a| a.assignment_name.as_str()).collect()
}

#[test]
fn repeat_batch_appends_distinct_copies() {
    let store = MemoryStore::new();
    let mut repo = AssignmentRepository::load(&store, SEMESTER).unwrap();

    let created = repo
        .add_assignments(AssignmentBatch::Repeat {
            draft: draft("Reading", "Lit", "2024-05-01"),
            times: 3,
        })
        .unwrap();
    assert_eq!(created.len(), 3);
    assert_ne!(created[0].id, created[1].id);
    assert_eq!(repo.todo().len(), 3);

    let err = repo
        .add_assignments(AssignmentBatch::Repeat {
            draft: draft("Reading", "Lit", "2024-05-01"),
            times: 0,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::ZeroRepeatCount)
    ));
}

#[test]
fn replace_batch_edits_in_place_in_either_list() {
    let store = MemoryStore::new();
    let mut repo = AssignmentRepository::load(&store, SEMESTER).unwrap();
    add_one(&mut repo, draft("First", "Bio", "2024-05-01"));
    add_one(&mut repo, draft("Second", "Bio", "2024-05-02"));
    let first_id = repo.todo()[0].id;

    repo.add_assignments(AssignmentBatch::Replace {
        id: first_id,
        draft: draft("First (revised)", "Bio", "2024-05-03"),
    })
    .unwrap();
    assert_eq!(names(repo.todo()), ["First (revised)", "Second"]);
    assert_eq!(repo.todo()[0].id, first_id);

    repo.complete(first_id).unwrap();
    repo.add_assignments(AssignmentBatch::Replace {
        id: first_id,
        draft: draft("Done right", "Bio", "2024-05-03"),
    })
    .unwrap();
    assert_eq!(names(repo.completed()), ["Done right"]);

    let err = repo
        .add_assignments(AssignmentBatch::Replace {
            id: uuid_like(),
            draft: draft("Ghost", "Bio", ""),
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

fn uuid_like() -> studydesk_core::AssignmentId {
    studydesk_core::Assignment::from_draft(&draft("tmp", "", "")).id
}

#[test]
fn complete_then_reopen_restores_membership() {
    let store = MemoryStore::new();
    let mut repo = AssignmentRepository::load(&store, SEMESTER).unwrap();
    add_one(&mut repo, draft("A", "Art", "2024-04-01"));
    add_one(&mut repo, draft("B", "Bio", "2024-05-01"));
    let original = repo.todo().to_vec();

    let moved = repo.complete_at(0).unwrap();
    assert_eq!(moved.assignment_name, "A");
    assert_eq!(names(repo.todo()), ["B"]);
    assert_eq!(names(repo.completed()), ["A"]);

    let last = repo.completed().len() - 1;
    repo.reopen_at(last).unwrap();
    assert!(repo.completed().is_empty());
    assert_eq!(names(repo.todo()), ["B", "A"]);

    let mut restored = repo.todo().to_vec();
    restored.sort_by_key(|a| a.assignment_name.clone());
    assert_eq!(restored, original);
}

#[test]
fn index_and_id_lookups_fail_loudly() {
    let store = MemoryStore::new();
    let mut repo = AssignmentRepository::load(&store, SEMESTER).unwrap();
    add_one(&mut repo, draft("Only", "Art", ""));

    let err = repo.complete_at(5).unwrap_err();
    assert!(matches!(err, RepoError::IndexOutOfRange { index: 5, len: 1 }));
    let err = repo.reopen_at(0).unwrap_err();
    assert!(matches!(err, RepoError::IndexOutOfRange { index: 0, len: 0 }));

    let id = repo.todo()[0].id;
    let err = repo.reopen(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
    let err = repo.delete_assignment(id, ListKind::Completed).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
    assert_eq!(repo.todo().len(), 1);
}

#[test]
fn delete_removes_from_the_named_list() {
    let store = MemoryStore::new();
    let mut repo = AssignmentRepository::load(&store, SEMESTER).unwrap();
    add_one(&mut repo, draft("A", "Art", ""));
    add_one(&mut repo, draft("B", "Bio", ""));
    repo.complete_at(1).unwrap();

    let removed = repo.delete_at(0, ListKind::Completed).unwrap();
    assert_eq!(removed.assignment_name, "B");
    let removed = repo.delete_at(0, ListKind::Todo).unwrap();
    assert_eq!(removed.assignment_name, "A");
    assert!(repo.find(removed.id).is_none());
}

#[test]
fn completion_ratio_tracks_both_lists() {
    let store = MemoryStore::new();
    let mut repo = AssignmentRepository::load(&store, SEMESTER).unwrap();
    assert_eq!(repo.completion_ratio(), 0.0);

    add_one(&mut repo, draft("A", "Art", ""));
    add_one(&mut repo, draft("B", "Bio", ""));
    add_one(&mut repo, draft("C", "Chem", ""));
    add_one(&mut repo, draft("D", "Drama", ""));
    repo.complete_at(0).unwrap();
    assert_eq!(repo.completion_ratio(), 0.25);

    while !repo.todo().is_empty() {
        repo.complete_at(0).unwrap();
    }
    assert_eq!(repo.completion_ratio(), 1.0);
    assert_eq!(repo.board().completion_ratio, 1.0);
}

#[test]
fn sorting_orders_by_date_and_class_name() {
    let store = MemoryStore::new();
    let mut repo = AssignmentRepository::load(&store, SEMESTER).unwrap();
    add_one(&mut repo, draft("Cells", "Bio", "2024-05-01"));
    add_one(&mut repo, draft("Sketch", "Art", "2024-04-01"));

    repo.sort(ListKind::Todo, SortKey::DueDateAsc).unwrap();
    assert_eq!(names(repo.todo()), ["Sketch", "Cells"]);

    repo.sort(ListKind::Todo, SortKey::DueDateDesc).unwrap();
    assert_eq!(names(repo.todo()), ["Cells", "Sketch"]);

    repo.sort(ListKind::Todo, SortKey::ClassNameAsc).unwrap();
    assert_eq!(names(repo.todo()), ["Sketch", "Cells"]);

    repo.sort(ListKind::Todo, SortKey::ClassNameDesc).unwrap();
    assert_eq!(names(repo.todo()), ["Cells", "Sketch"]);
}

#[test]
fn apply_sort_persists_preference_and_lists() {
    let store = MemoryStore::new();
    let mut repo = AssignmentRepository::load(&store, SEMESTER).unwrap();
    add_one(&mut repo, draft("Late", "Bio", "2024-06-01"));
    add_one(&mut repo, draft("Early", "Bio", "2024-01-01"));

    repo.apply_sort(SortKey::DueDateAsc).unwrap();
    assert_eq!(store.get("sortBy").unwrap().as_deref(), Some("dueDate-asc"));

    let reloaded = AssignmentRepository::load(&store, SEMESTER).unwrap();
    assert_eq!(reloaded.sort_key(), Some(SortKey::DueDateAsc));
    assert_eq!(names(reloaded.todo()), ["Early", "Late"]);
}

#[test]
fn lists_are_scoped_per_semester_and_persisted_under_semester_keys() {
    let store = MemoryStore::new();
    let mut spring = AssignmentRepository::load(&store, "1").unwrap();
    add_one(&mut spring, draft("Spring HW", "Bio", ""));
    spring.complete_at(0).unwrap();

    let fall = AssignmentRepository::load(&store, "2").unwrap();
    assert!(fall.todo().is_empty());
    assert!(fall.completed().is_empty());

    assert_eq!(store.get("assignments_1").unwrap().as_deref(), Some("[]"));
    let completed = store.get("completedAssignments_1").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&completed).unwrap();
    assert_eq!(json[0]["assignmentName"], "Spring HW");
    assert_eq!(json[0]["color"], "#4b0082");
}

#[test]
fn legacy_sort_preference_and_records_load() {
    let store = MemoryStore::new();
    store.set("sortBy", "classNameZtoA").unwrap();
    store
        .set(
            "assignments_9",
            r##"[{"assignmentName":"Old","className":"Hist","dueDate":"2023-09-01","color":"#808080"}]"##,
        )
        .unwrap();

    let repo = AssignmentRepository::load(&store, "9").unwrap();
    assert_eq!(repo.sort_key(), Some(SortKey::ClassNameDesc));
    assert_eq!(names(repo.todo()), ["Old"]);

    store.set("sortBy", "className").unwrap();
    let repo = AssignmentRepository::load(&store, "9").unwrap();
    assert_eq!(repo.sort_key(), None);
}

#[test]
fn legacy_records_keep_their_backfilled_ids() {
    let store = MemoryStore::new();
    store
        .set(
            "assignments_1",
            r##"[{"assignmentName":"Essay","className":"Eng","dueDate":"2023-10-02","color":"#123456"}]"##,
        )
        .unwrap();
    store
        .set(
            "completedAssignments_1",
            r#"[{"assignmentName":"Quiz","className":"Eng","dueDate":"2023-09-20"}]"#,
        )
        .unwrap();

    let first = AssignmentRepository::load(&store, "1").unwrap();
    let essay = first.todo()[0].id;
    let quiz = first.completed()[0].id;
    assert!(!essay.is_nil());
    assert!(!quiz.is_nil());
    drop(first);

    let mut second = AssignmentRepository::load(&store, "1").unwrap();
    assert_eq!(second.completed()[0].id, quiz);
    let done = second.complete(essay).unwrap();
    assert_eq!(done.assignment_name, "Essay");
    assert_eq!(names(second.completed()), ["Quiz", "Essay"]);
}
