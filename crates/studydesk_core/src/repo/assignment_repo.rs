//! Semester todo tracker: the todo and completed assignment lists.
//!
//! # Responsibility
//! - Bulk create, edit, complete, reopen, delete and sort assignments.
//! - Persist both lists after every mutation.
//!
//! # Invariants
//! - An assignment id lives in exactly one of the two lists.
//! - `complete` and `reopen` move the record to the end of the other list.
//! - Both lists are written together, todo first.
//!
//! # See also
//! - `model::assignment` for the ordering rules.

use super::{load_failure, store_failure, RepoError, RepoResult};
use crate::model::assignment::{
    assign_missing_ids, sort_assignments, Assignment, AssignmentDraft, AssignmentId, ListKind,
    SortKey,
};
use crate::model::ValidationError;
use crate::store::{keys, load_json, save_json, KeyValueStore};
use log::{debug, info, warn};
use serde::Serialize;

const MODULE: &str = "assignment_repo";

/// One write request: either N copies of a draft, or an in-place edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentBatch {
    /// Append `times` new assignments built from `draft` to the todo list.
    Repeat { draft: AssignmentDraft, times: u32 },
    /// Replace the fields of `id` where it currently sits, keeping its id.
    Replace {
        id: AssignmentId,
        draft: AssignmentDraft,
    },
}

/// Read snapshot of a semester's tracker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentBoard {
    pub todo: Vec<Assignment>,
    pub completed: Vec<Assignment>,
    pub completion_ratio: f64,
}

/// Todo/completed lists of one semester.
pub struct AssignmentRepository<S: KeyValueStore> {
    store: S,
    semester_id: String,
    todo: Vec<Assignment>,
    completed: Vec<Assignment>,
    sort_key: Option<SortKey>,
}

impl<S: KeyValueStore> AssignmentRepository<S> {
    /// Loads both lists of `semester_id` and the saved sort preference.
    ///
    /// Missing records load as empty lists. An unknown `sortBy` value is
    /// ignored with a warning. Records saved without an id get one, and
    /// both lists are written back so the ids survive the next load.
    pub fn load(store: S, semester_id: impl Into<String>) -> RepoResult<Self> {
        let semester_id = semester_id.into();
        let mut todo: Vec<Assignment> = load_json(&store, &keys::todo_assignments(&semester_id))
            .map_err(|err| load_failure(MODULE, err))?
            .unwrap_or_default();
        let mut completed: Vec<Assignment> =
            load_json(&store, &keys::completed_assignments(&semester_id))
                .map_err(|err| load_failure(MODULE, err))?
                .unwrap_or_default();
        let backfilled = assign_missing_ids(&mut todo) + assign_missing_ids(&mut completed);
        let sort_key = match store
            .get(keys::SORT_BY)
            .map_err(|err| load_failure(MODULE, err))?
        {
            Some(raw) => match raw.parse::<SortKey>() {
                Ok(key) => Some(key),
                Err(message) => {
                    warn!("event=load module={MODULE} status=ignored reason=\"{message}\"");
                    None
                }
            },
            None => None,
        };

        let repo = Self {
            store,
            semester_id,
            todo,
            completed,
            sort_key,
        };
        if backfilled > 0 {
            repo.persist("assignment_id_backfill")?;
            info!(
                "event=assignment_id_backfill module={MODULE} status=ok semester_id={} count={backfilled}",
                repo.semester_id
            );
        }

        debug!(
            "event=load module={MODULE} status=ok semester_id={}",
            repo.semester_id
        );
        Ok(repo)
    }

    pub fn semester_id(&self) -> &str {
        &self.semester_id
    }

    pub fn todo(&self) -> &[Assignment] {
        &self.todo
    }

    pub fn completed(&self) -> &[Assignment] {
        &self.completed
    }

    pub fn list(&self, kind: ListKind) -> &[Assignment] {
        match kind {
            ListKind::Todo => &self.todo,
            ListKind::Completed => &self.completed,
        }
    }

    /// Sort preference loaded from or last written to `sortBy`.
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    /// Finds an assignment by id in either list.
    pub fn find(&self, id: AssignmentId) -> Option<(ListKind, &Assignment)> {
        self.todo
            .iter()
            .find(|assignment| assignment.id == id)
            .map(|assignment| (ListKind::Todo, assignment))
            .or_else(|| {
                self.completed
                    .iter()
                    .find(|assignment| assignment.id == id)
                    .map(|assignment| (ListKind::Completed, assignment))
            })
    }

    /// Share of assignments completed; `0.0` when both lists are empty.
    pub fn completion_ratio(&self) -> f64 {
        let total = self.todo.len() + self.completed.len();
        if total == 0 {
            0.0
        } else {
            self.completed.len() as f64 / total as f64
        }
    }

    pub fn board(&self) -> AssignmentBoard {
        AssignmentBoard {
            todo: self.todo.clone(),
            completed: self.completed.clone(),
            completion_ratio: self.completion_ratio(),
        }
    }

    /// Applies one batch and returns the assignments it created or edited.
    pub fn add_assignments(&mut self, batch: AssignmentBatch) -> RepoResult<Vec<Assignment>> {
        match batch {
            AssignmentBatch::Repeat { draft, times } => {
                draft.validate()?;
                if times == 0 {
                    return Err(ValidationError::ZeroRepeatCount.into());
                }

                let created: Vec<Assignment> =
                    (0..times).map(|_| Assignment::from_draft(&draft)).collect();
                self.todo.extend(created.iter().cloned());
                self.persist("assignment_add")?;

                info!(
                    "event=assignment_add module={MODULE} status=ok semester_id={} count={}",
                    self.semester_id,
                    created.len()
                );
                Ok(created)
            }
            AssignmentBatch::Replace { id, draft } => {
                draft.validate()?;
                let slot = self
                    .todo
                    .iter_mut()
                    .chain(self.completed.iter_mut())
                    .find(|assignment| assignment.id == id)
                    .ok_or_else(|| RepoError::not_found("assignment", id))?;

                *slot = Assignment::with_id(id, &draft);
                let edited = slot.clone();
                self.persist("assignment_edit")?;
                Ok(vec![edited])
            }
        }
    }

    /// Moves `id` from todo to the end of completed.
    pub fn complete(&mut self, id: AssignmentId) -> RepoResult<Assignment> {
        self.transfer(id, ListKind::Todo, "assignment_complete")
    }

    /// Moves `id` from completed back to the end of todo.
    pub fn reopen(&mut self, id: AssignmentId) -> RepoResult<Assignment> {
        self.transfer(id, ListKind::Completed, "assignment_reopen")
    }

    /// Removes `id` from the given list.
    pub fn delete_assignment(&mut self, id: AssignmentId, kind: ListKind) -> RepoResult<Assignment> {
        let list = self.list_mut(kind);
        let position = position_of(list, id)?;
        let removed = list.remove(position);
        self.persist("assignment_delete")?;

        debug!("event=assignment_delete module={MODULE} status=ok list={kind}");
        Ok(removed)
    }

    /// [`Self::complete`] addressed by todo position.
    pub fn complete_at(&mut self, index: usize) -> RepoResult<Assignment> {
        let id = self.id_at(ListKind::Todo, index)?;
        self.complete(id)
    }

    /// [`Self::reopen`] addressed by completed position.
    pub fn reopen_at(&mut self, index: usize) -> RepoResult<Assignment> {
        let id = self.id_at(ListKind::Completed, index)?;
        self.reopen(id)
    }

    /// [`Self::delete_assignment`] addressed by position.
    pub fn delete_at(&mut self, index: usize, kind: ListKind) -> RepoResult<Assignment> {
        let id = self.id_at(kind, index)?;
        self.delete_assignment(id, kind)
    }

    /// Stable-sorts one list by `key` and persists it.
    pub fn sort(&mut self, kind: ListKind, key: SortKey) -> RepoResult<()> {
        sort_assignments(self.list_mut(kind), key);
        self.persist("assignment_sort")
    }

    /// Sorts both lists and remembers `key` under `sortBy`.
    pub fn apply_sort(&mut self, key: SortKey) -> RepoResult<()> {
        sort_assignments(&mut self.todo, key);
        sort_assignments(&mut self.completed, key);
        self.sort_key = Some(key);

        self.store
            .set(keys::SORT_BY, key.as_str())
            .map_err(|err| store_failure(MODULE, "sort_preference_save", err))?;
        self.persist("assignment_sort")
    }

    fn transfer(
        &mut self,
        id: AssignmentId,
        from: ListKind,
        op: &'static str,
    ) -> RepoResult<Assignment> {
        let (source, target) = match from {
            ListKind::Todo => (&mut self.todo, &mut self.completed),
            ListKind::Completed => (&mut self.completed, &mut self.todo),
        };
        let position = position_of(source, id)?;
        let moved = source.remove(position);
        target.push(moved.clone());
        self.persist(op)?;

        debug!(
            "event={op} module={MODULE} status=ok semester_id={}",
            self.semester_id
        );
        Ok(moved)
    }

    fn id_at(&self, kind: ListKind, index: usize) -> RepoResult<AssignmentId> {
        let list = self.list(kind);
        list.get(index)
            .map(|assignment| assignment.id)
            .ok_or(RepoError::IndexOutOfRange {
                index,
                len: list.len(),
            })
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut Vec<Assignment> {
        match kind {
            ListKind::Todo => &mut self.todo,
            ListKind::Completed => &mut self.completed,
        }
    }

    fn persist(&self, op: &'static str) -> RepoResult<()> {
        save_json(
            &self.store,
            &keys::todo_assignments(&self.semester_id),
            &self.todo,
        )
        .and_then(|()| {
            save_json(
                &self.store,
                &keys::completed_assignments(&self.semester_id),
                &self.completed,
            )
        })
        .map_err(|err| store_failure(MODULE, op, err))
    }
}

fn position_of(list: &[Assignment], id: AssignmentId) -> RepoResult<usize> {
    list.iter()
        .position(|assignment| assignment.id == id)
        .ok_or_else(|| RepoError::not_found("assignment", id))
}
