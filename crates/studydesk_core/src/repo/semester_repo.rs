//! Semester list repository.
//!
//! # Invariants
//! - Semester ids are unique; new ids are creation timestamps in epoch
//!   milliseconds, bumped forward on collision.
//! - Deleting a semester also deletes its todo and completed lists.

use super::{load_failure, store_failure, RepoError, RepoResult};
use crate::model::require_name;
use crate::model::semester::Semester;
use crate::store::{keys, load_json, save_json, KeyValueStore};
use chrono::Utc;
use log::info;

const MODULE: &str = "semester_repo";

/// Owns the semester list and its persisted copy.
pub struct SemesterRepository<S: KeyValueStore> {
    store: S,
    semesters: Vec<Semester>,
}

impl<S: KeyValueStore> SemesterRepository<S> {
    /// Loads the `semesters` record; a missing record is an empty list.
    pub fn load(store: S) -> RepoResult<Self> {
        let semesters = load_json(&store, keys::SEMESTERS)
            .map_err(|err| load_failure(MODULE, err))?
            .unwrap_or_default();
        Ok(Self { store, semesters })
    }

    pub fn list(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn get(&self, id: &str) -> Option<&Semester> {
        self.semesters.iter().find(|semester| semester.id == id)
    }

    /// Creates a semester stamped with the current time.
    pub fn add_semester(&mut self, name: &str) -> RepoResult<Semester> {
        self.add_semester_at(name, Utc::now().timestamp_millis())
    }

    /// Creates a semester whose id derives from `created_at_ms`.
    pub fn add_semester_at(&mut self, name: &str, created_at_ms: i64) -> RepoResult<Semester> {
        require_name("semester name", name)?;

        let mut stamp = created_at_ms;
        while self.get(&stamp.to_string()).is_some() {
            stamp += 1;
        }

        let semester = Semester {
            id: stamp.to_string(),
            name: name.trim().to_string(),
        };
        self.semesters.push(semester.clone());
        self.persist("semester_add")?;

        info!(
            "event=semester_add module={MODULE} status=ok semester_id={}",
            semester.id
        );
        Ok(semester)
    }

    pub fn rename_semester(&mut self, id: &str, name: &str) -> RepoResult<Semester> {
        require_name("semester name", name)?;
        let semester = self
            .semesters
            .iter_mut()
            .find(|semester| semester.id == id)
            .ok_or_else(|| RepoError::not_found("semester", id))?;

        semester.name = name.trim().to_string();
        let renamed = semester.clone();
        self.persist("semester_rename")?;
        Ok(renamed)
    }

    /// Removes the semester and both of its assignment lists.
    pub fn delete_semester(&mut self, id: &str) -> RepoResult<Semester> {
        let position = self
            .semesters
            .iter()
            .position(|semester| semester.id == id)
            .ok_or_else(|| RepoError::not_found("semester", id))?;

        let removed = self.semesters.remove(position);
        self.persist("semester_delete")?;
        for key in [keys::todo_assignments(id), keys::completed_assignments(id)] {
            self.store
                .remove(&key)
                .map_err(|err| store_failure(MODULE, "semester_delete", err))?;
        }

        info!("event=semester_delete module={MODULE} status=ok semester_id={id}");
        Ok(removed)
    }

    fn persist(&self, op: &'static str) -> RepoResult<()> {
        save_json(&self.store, keys::SEMESTERS, &self.semesters)
            .map_err(|err| store_failure(MODULE, op, err))
    }
}
