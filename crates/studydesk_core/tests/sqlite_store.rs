use rusqlite::Connection;
use studydesk_core::db::migrations::latest_version;
use studydesk_core::db::{open_db, open_db_in_memory, DbError};
use studydesk_core::{ClassRepository, GradedAssignmentInput, KeyValueStore, SqliteStore};

#[test]
fn get_set_remove_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::new(&conn);

    assert!(store.get("semesters").unwrap().is_none());
    store.set("semesters", "[]").unwrap();
    store.set("semesters", r#"[{"id":"1","name":"Fall"}]"#).unwrap();
    assert_eq!(
        store.get("semesters").unwrap().as_deref(),
        Some(r#"[{"id":"1","name":"Fall"}]"#)
    );

    store.remove("semesters").unwrap();
    store.remove("semesters").unwrap();
    assert!(store.get("semesters").unwrap().is_none());
}

#[test]
fn repository_state_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studydesk.db");

    {
        let conn = open_db(&path).unwrap();
        let mut repo = ClassRepository::load(SqliteStore::new(&conn)).unwrap();
        repo.add_class("Statistics").unwrap();
        repo.add_category("Statistics", "Projects", 100.0).unwrap();
        repo.add_graded_assignment(
            "Statistics",
            GradedAssignmentInput::new("Regression", 91.5, "Projects"),
        )
        .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = ClassRepository::load(SqliteStore::new(&conn)).unwrap();
    assert_eq!(repo.snapshot("Statistics").unwrap().grades.final_grade, 91.5);
}

#[test]
fn newer_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 42);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}
