//! Entity store facade.
//!
//! # Responsibility
//! - Own the single entity-database handle for the process lifetime.
//! - Expose category/task CRUD with the caller-facing error taxonomy.
//!
//! # Invariants
//! - Callers never see raw storage errors; they get `Validation`,
//!   `NotFound` or `Io`.
//! - Every task references a live category; deleting a category removes
//!   its tasks atomically.
//! - Operations are synchronous and complete before returning.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::category::{Category, CategoryId};
use crate::model::task::{Priority, Task, TaskId};
use crate::model::validation::ValidationError;
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskCounts, TaskRepository};
use crate::repo::{EntityKind, RepoError};
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Caller-facing store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input violates a field constraint; re-prompt the user.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Referenced id no longer exists; refresh the view.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },
    /// Durable storage failed; the operation was aborted without partial state.
    #[error("storage failure: {0}")]
    Io(#[source] RepoError),
}

impl StoreError {
    /// Stable machine-readable code for logs and shells.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound { .. } => "not_found",
            Self::Io(_) => "io",
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Io(other),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Io(RepoError::Db(value))
    }
}

/// Handle to the entity store. Opened once and passed to whatever drives it.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens the database file at `path`, creating and migrating as needed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn categories(&self) -> SqliteCategoryRepository<'_> {
        SqliteCategoryRepository::new(&self.conn)
    }

    fn tasks(&self) -> SqliteTaskRepository<'_> {
        SqliteTaskRepository::new(&self.conn)
    }

    /// Creates a category. `color` defaults to `#3498db`.
    ///
    /// # Errors
    /// - `Validation` when `name` is blank or already used.
    pub fn create_category(
        &self,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> StoreResult<Category> {
        let category = Category::new(name, icon, color)?;
        let result = self.categories().create_category(&category);
        log_outcome("category_create", &result, category.id);
        result?;
        Ok(category)
    }

    /// Renames/restyles a category in place. Owned tasks are unaffected.
    ///
    /// # Errors
    /// - `NotFound` when `id` does not exist.
    /// - `Validation` when `name` is blank or used by another category.
    pub fn update_category(
        &self,
        id: CategoryId,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> StoreResult<()> {
        let mut category = self.require_category(id)?;
        category.apply_edit(name, icon, color)?;
        let result = self.categories().update_category(&category);
        log_outcome("category_update", &result, id);
        Ok(result?)
    }

    /// Deletes a category together with all of its tasks, atomically.
    pub fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let result = self.categories().delete_category_cascade(id);
        log_outcome("category_delete", &result, id);
        result?;
        Ok(())
    }

    /// Lists categories in creation order.
    pub fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.categories().list_categories()?)
    }

    /// Loads one category, `None` when it does not exist.
    pub fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.categories().get_category(id)?)
    }

    /// Creates an open task dated today under `category_id`.
    ///
    /// # Errors
    /// - `Validation` when `title` is blank.
    /// - `NotFound` when the category does not exist.
    pub fn create_task(
        &self,
        category_id: CategoryId,
        title: &str,
        description: Option<&str>,
        priority: Priority,
    ) -> StoreResult<Task> {
        let task = Task::new(category_id, title, description, priority)?;
        let result = self.tasks().create_task(&task);
        log_outcome("task_create", &result, task.id);
        result?;
        Ok(task)
    }

    /// Edits title, description and priority of a task.
    pub fn update_task(
        &self,
        id: TaskId,
        title: &str,
        description: Option<&str>,
        priority: Priority,
    ) -> StoreResult<()> {
        let mut task = self
            .tasks()
            .get_task(id)?
            .ok_or(StoreError::NotFound {
                kind: EntityKind::Task,
                id,
            })?;
        task.apply_edit(title, description, priority)?;
        let result = self.tasks().update_task(&task);
        log_outcome("task_update", &result, id);
        Ok(result?)
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_task_completion(&self, id: TaskId) -> StoreResult<bool> {
        let result = self.tasks().toggle_task_completion(id);
        log_outcome("task_toggle", &result, id);
        Ok(result?)
    }

    /// Deletes one task; the owning category and siblings are unaffected.
    pub fn delete_task(&self, id: TaskId) -> StoreResult<()> {
        let result = self.tasks().delete_task(id);
        log_outcome("task_delete", &result, id);
        Ok(result?)
    }

    /// Lists tasks of a category in creation order.
    ///
    /// Unknown categories yield an empty list rather than an error.
    pub fn list_tasks_by_category(&self, category_id: CategoryId) -> StoreResult<Vec<Task>> {
        Ok(self.tasks().list_tasks_by_category(category_id)?)
    }

    pub fn get_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self.tasks().get_task(id)?)
    }

    /// Total and completed task counts of a category.
    pub fn count_tasks(&self, category_id: CategoryId) -> StoreResult<TaskCounts> {
        Ok(self.tasks().count_tasks(category_id)?)
    }

    fn require_category(&self, id: CategoryId) -> StoreResult<Category> {
        self.categories()
            .get_category(id)?
            .ok_or(StoreError::NotFound {
                kind: EntityKind::Category,
                id,
            })
    }
}

fn log_outcome<T>(event: &str, result: &Result<T, RepoError>, id: Uuid) {
    match result {
        Ok(_) => info!("event={event} module=store status=ok id={id}"),
        Err(RepoError::Validation(_) | RepoError::NotFound { .. }) => {
            warn!("event={event} module=store status=rejected id={id}")
        }
        Err(err) => error!("event={event} module=store status=error id={id} error={err}"),
    }
}
