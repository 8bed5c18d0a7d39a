//! Grade-tracking classes, their categories and graded assignments.
//!
//! # Responsibility
//! - CRUD over classes, categories and graded assignments.
//! - Recompute grades after every mutation so callers never see stale values.
//!
//! # Invariants
//! - Class names are unique in the class list.
//! - Category names are unique within a class.
//! - New or edited graded assignments must name an existing category;
//!   removing or renaming a category leaves references dangling.
//! - Each class is persisted under `classData_{className}`; the `classes`
//!   record lists the names in display order.
//! - Loading repairs older data: repeated class names keep their first
//!   entry, and graded assignments without ids get one. Repairs are
//!   written back before `load` returns.

use super::{load_failure, store_failure, RepoError, RepoResult};
use crate::grading::{compute_class_grades, CalculatedGrades};
use crate::model::class::{Category, Class, ClassListEntry, GradedAssignment, GradedAssignmentId};
use crate::model::require_name;
use crate::store::{keys, load_json, save_json, KeyValueStore};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const MODULE: &str = "class_repo";

/// Class state paired with freshly computed grades.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSnapshot {
    pub class: Class,
    pub grades: CalculatedGrades,
}

impl ClassSnapshot {
    fn of(class: &Class) -> Self {
        Self {
            class: class.clone(),
            grades: compute_class_grades(class),
        }
    }
}

/// Field values for adding or editing a graded assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedAssignmentInput {
    pub assignment_name: String,
    pub grade: f64,
    pub category: String,
}

impl GradedAssignmentInput {
    pub fn new(assignment_name: impl Into<String>, grade: f64, category: impl Into<String>) -> Self {
        Self {
            assignment_name: assignment_name.into(),
            grade,
            category: category.into(),
        }
    }
}

// Body of `classData_*`. The class name comes from the `classes` list.
#[derive(Deserialize)]
struct ClassDataRecord {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    assignments: Vec<GradedAssignment>,
}

/// Owns every class and its persisted records.
pub struct ClassRepository<S: KeyValueStore> {
    store: S,
    classes: Vec<Class>,
}

impl<S: KeyValueStore> ClassRepository<S> {
    /// Loads the class list and each class's data record.
    ///
    /// A listed class without a data record loads as an empty class.
    pub fn load(store: S) -> RepoResult<Self> {
        let entries: Vec<ClassListEntry> = load_json(&store, keys::CLASSES)
            .map_err(|err| load_failure(MODULE, err))?
            .unwrap_or_default();

        let listed = entries.len();
        let mut classes: Vec<Class> = Vec::with_capacity(listed);
        let mut backfilled = Vec::new();
        for entry in entries {
            if classes.iter().any(|class| class.class_name == entry.class_name) {
                warn!("event=load module={MODULE} status=repaired reason=duplicate_class_name");
                continue;
            }
            let record: Option<ClassDataRecord> =
                load_json(&store, &keys::class_data(&entry.class_name))
                    .map_err(|err| load_failure(MODULE, err))?;
            let mut class = Class::new(entry.class_name);
            if let Some(record) = record {
                class.categories = record.categories;
                class.assignments = record.assignments;
            }
            if class.assign_missing_ids() > 0 {
                backfilled.push(classes.len());
            }
            classes.push(class);
        }

        let repo = Self { store, classes };
        if repo.classes.len() < listed {
            repo.save_class_list("class_list_repair")?;
        }
        for index in backfilled {
            repo.save_class(&repo.classes[index], "graded_assignment_id_backfill")?;
        }

        debug!(
            "event=load module={MODULE} status=ok class_count={}",
            repo.classes.len()
        );
        Ok(repo)
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn get(&self, class_name: &str) -> Option<&Class> {
        self.classes
            .iter()
            .find(|class| class.class_name == class_name)
    }

    /// Current state of one class with its computed grades.
    pub fn snapshot(&self, class_name: &str) -> RepoResult<ClassSnapshot> {
        self.get(class_name)
            .map(ClassSnapshot::of)
            .ok_or_else(|| RepoError::not_found("class", class_name))
    }

    pub fn add_class(&mut self, class_name: &str) -> RepoResult<ClassSnapshot> {
        require_name("class name", class_name)?;
        let class_name = class_name.trim();
        if self.get(class_name).is_some() {
            return Err(RepoError::duplicate("class", class_name));
        }

        let class = Class::new(class_name);
        self.classes.push(class.clone());
        self.save_class_list("class_add")?;
        self.save_class(&class, "class_add")?;

        info!("event=class_add module={MODULE} status=ok");
        Ok(ClassSnapshot::of(&class))
    }

    /// Renames a class and moves its data record to the new key.
    pub fn rename_class(&mut self, old_name: &str, new_name: &str) -> RepoResult<ClassSnapshot> {
        require_name("class name", new_name)?;
        let new_name = new_name.trim();
        let index = self.index_of(old_name)?;
        if new_name == old_name {
            return Ok(ClassSnapshot::of(&self.classes[index]));
        }
        if self.get(new_name).is_some() {
            return Err(RepoError::duplicate("class", new_name));
        }

        self.classes[index].class_name = new_name.to_string();
        let class = self.classes[index].clone();
        self.save_class_list("class_rename")?;
        self.save_class(&class, "class_rename")?;
        self.store
            .remove(&keys::class_data(old_name))
            .map_err(|err| store_failure(MODULE, "class_rename", err))?;

        info!("event=class_rename module={MODULE} status=ok");
        Ok(ClassSnapshot::of(&class))
    }

    /// Removes a class and its data record.
    pub fn delete_class(&mut self, class_name: &str) -> RepoResult<Class> {
        let index = self.index_of(class_name)?;
        let removed = self.classes.remove(index);
        self.save_class_list("class_delete")?;
        self.store
            .remove(&keys::class_data(class_name))
            .map_err(|err| store_failure(MODULE, "class_delete", err))?;

        info!("event=class_delete module={MODULE} status=ok");
        Ok(removed)
    }

    pub fn add_category(
        &mut self,
        class_name: &str,
        name: &str,
        weight: f64,
    ) -> RepoResult<ClassSnapshot> {
        let category = Category::new(name.trim(), weight);
        category.validate()?;
        self.mutate_class(class_name, "category_add", |class| {
            if class.has_category(&category.name) {
                return Err(RepoError::duplicate("category", category.name.as_str()));
            }
            class.categories.push(category);
            Ok(())
        })
    }

    /// Replaces a category's name and weight in place.
    ///
    /// Graded assignments still naming `old_name` are not rewritten.
    pub fn edit_category(
        &mut self,
        class_name: &str,
        old_name: &str,
        new_name: &str,
        weight: f64,
    ) -> RepoResult<ClassSnapshot> {
        let replacement = Category::new(new_name.trim(), weight);
        replacement.validate()?;
        self.mutate_class(class_name, "category_edit", |class| {
            if replacement.name != old_name && class.has_category(&replacement.name) {
                return Err(RepoError::duplicate("category", replacement.name.as_str()));
            }
            let slot = class
                .categories
                .iter_mut()
                .find(|category| category.name == old_name)
                .ok_or_else(|| RepoError::not_found("category", old_name))?;
            *slot = replacement;
            Ok(())
        })
    }

    /// Removes a category; its graded assignments stay and stop counting.
    pub fn delete_category(&mut self, class_name: &str, name: &str) -> RepoResult<ClassSnapshot> {
        self.mutate_class(class_name, "category_delete", |class| {
            let position = class
                .categories
                .iter()
                .position(|category| category.name == name)
                .ok_or_else(|| RepoError::not_found("category", name))?;
            class.categories.remove(position);
            Ok(())
        })
    }

    pub fn add_graded_assignment(
        &mut self,
        class_name: &str,
        input: GradedAssignmentInput,
    ) -> RepoResult<ClassSnapshot> {
        let assignment = GradedAssignment::new(
            input.assignment_name.trim(),
            input.grade,
            input.category.trim(),
        );
        assignment.validate()?;
        self.mutate_class(class_name, "graded_assignment_add", |class| {
            if !class.has_category(&assignment.category) {
                return Err(RepoError::not_found("category", assignment.category.as_str()));
            }
            class.assignments.push(assignment);
            Ok(())
        })
    }

    /// Replaces the fields of graded assignment `id`, keeping its id.
    pub fn edit_graded_assignment(
        &mut self,
        class_name: &str,
        id: GradedAssignmentId,
        input: GradedAssignmentInput,
    ) -> RepoResult<ClassSnapshot> {
        let mut replacement = GradedAssignment::new(
            input.assignment_name.trim(),
            input.grade,
            input.category.trim(),
        );
        replacement.id = id;
        replacement.validate()?;
        self.mutate_class(class_name, "graded_assignment_edit", |class| {
            if !class.has_category(&replacement.category) {
                return Err(RepoError::not_found("category", replacement.category.as_str()));
            }
            let slot = class
                .assignments
                .iter_mut()
                .find(|assignment| assignment.id == id)
                .ok_or_else(|| RepoError::not_found("graded assignment", id))?;
            *slot = replacement;
            Ok(())
        })
    }

    pub fn delete_graded_assignment(
        &mut self,
        class_name: &str,
        id: GradedAssignmentId,
    ) -> RepoResult<ClassSnapshot> {
        self.mutate_class(class_name, "graded_assignment_delete", |class| {
            let position = class
                .assignments
                .iter()
                .position(|assignment| assignment.id == id)
                .ok_or_else(|| RepoError::not_found("graded assignment", id))?;
            class.assignments.remove(position);
            Ok(())
        })
    }

    // `apply` must fail before touching the class, so errors leave state intact.
    fn mutate_class<F>(
        &mut self,
        class_name: &str,
        op: &'static str,
        apply: F,
    ) -> RepoResult<ClassSnapshot>
    where
        F: FnOnce(&mut Class) -> RepoResult<()>,
    {
        let index = self.index_of(class_name)?;
        apply(&mut self.classes[index])?;

        let class = &self.classes[index];
        self.save_class(class, op)?;

        let snapshot = ClassSnapshot::of(class);
        debug!(
            "event={op} module={MODULE} status=ok categories={} assignments={} final_grade={}",
            class.categories.len(),
            class.assignments.len(),
            snapshot.grades.final_grade
        );
        Ok(snapshot)
    }

    fn index_of(&self, class_name: &str) -> RepoResult<usize> {
        self.classes
            .iter()
            .position(|class| class.class_name == class_name)
            .ok_or_else(|| RepoError::not_found("class", class_name))
    }

    fn save_class_list(&self, op: &'static str) -> RepoResult<()> {
        let entries: Vec<ClassListEntry> = self
            .classes
            .iter()
            .map(|class| ClassListEntry {
                class_name: class.class_name.clone(),
            })
            .collect();
        save_json(&self.store, keys::CLASSES, &entries).map_err(|err| store_failure(MODULE, op, err))
    }

    fn save_class(&self, class: &Class, op: &'static str) -> RepoResult<()> {
        save_json(&self.store, &keys::class_data(&class.class_name), class)
            .map_err(|err| store_failure(MODULE, op, err))
    }
}
