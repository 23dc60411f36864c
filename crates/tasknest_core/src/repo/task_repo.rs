//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - A task is only inserted under an existing category.
//! - Updates never touch `category_id`, `completed` or `created_at`.
//! - Listing order within a category is creation order (`rowid ASC`).

use super::category_repo::category_exists;
use super::{
    bool_to_int, is_constraint_violation, parse_bool, parse_uuid, RepoError, RepoResult,
};
use crate::model::category::CategoryId;
use crate::model::task::{Priority, Task, TaskId};
use chrono::NaiveDate;
use rusqlite::{ffi, params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    category_id,
    title,
    description,
    completed,
    priority,
    due_date,
    created_at
FROM tasks";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Completion summary for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
}

/// Repository interface for task persistence.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Persists the editable fields (title, description, priority).
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Task>>;
    /// Flips `completed` and returns the stored value.
    fn toggle_task_completion(&self, id: TaskId) -> RepoResult<bool>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    fn count_tasks(&self, category_id: CategoryId) -> RepoResult<TaskCounts>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !category_exists(&tx, task.category_id)? {
            return Err(RepoError::category_not_found(task.category_id));
        }

        tx.execute(
            "INSERT INTO tasks (
                id,
                category_id,
                title,
                description,
                completed,
                priority,
                due_date,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                task.id.to_string(),
                task.category_id.to_string(),
                task.title.as_str(),
                task.description.as_deref(),
                bool_to_int(task.completed),
                task.priority.as_str(),
                task.due_date,
                task.created_at,
            ],
        )
        .map_err(|err| {
            if is_constraint_violation(&err, ffi::SQLITE_CONSTRAINT_FOREIGNKEY) {
                RepoError::category_not_found(task.category_id)
            } else {
                err.into()
            }
        })?;

        tx.commit()?;
        Ok(task.id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?2,
                description = ?3,
                priority = ?4,
                due_date = ?5
             WHERE id = ?1;",
            params![
                task.id.to_string(),
                task.title.as_str(),
                task.description.as_deref(),
                task.priority.as_str(),
                task.due_date,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::task_not_found(task.id));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_tasks_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE category_id = ?1
             ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([category_id.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn toggle_task_completion(&self, id: TaskId) -> RepoResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let current: Option<i64> = tx
            .query_row(
                "SELECT completed
                 FROM tasks
                 WHERE id = ?1;",
                [id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        let Some(current) = current else {
            return Err(RepoError::task_not_found(id));
        };

        let next = !parse_bool(current, "tasks.completed")?;
        tx.execute(
            "UPDATE tasks
             SET completed = ?2
             WHERE id = ?1;",
            params![id.to_string(), bool_to_int(next)],
        )?;

        tx.commit()?;
        Ok(next)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM tasks
             WHERE id = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::task_not_found(id));
        }

        Ok(())
    }

    fn count_tasks(&self, category_id: CategoryId) -> RepoResult<TaskCounts> {
        let (total, completed): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(completed), 0)
             FROM tasks
             WHERE category_id = ?1;",
            [category_id.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(TaskCounts {
            total: count_to_usize(total)?,
            completed: count_to_usize(completed)?,
        })
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let category_text: String = row.get("category_id")?;

    let priority_text: String = row.get("priority")?;
    let priority = Priority::from_tag(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in tasks.priority"
        ))
    })?;

    let due_date = row
        .get::<_, Option<String>>("due_date")?
        .map(|value| parse_date(&value, "tasks.due_date"))
        .transpose()?;
    let created_text: String = row.get("created_at")?;

    let task = Task {
        id: parse_uuid(&id_text, "tasks.id")?,
        category_id: parse_uuid(&category_text, "tasks.category_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed: parse_bool(row.get("completed")?, "tasks.completed")?,
        priority,
        due_date,
        created_at: parse_date(&created_text, "tasks.created_at")?,
    };
    task.validate()
        .map_err(|err| RepoError::InvalidData(format!("{err} in tasks.title")))?;
    Ok(task)
}

fn parse_date(value: &str, column: &'static str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}

fn count_to_usize(value: i64) -> RepoResult<usize> {
    usize::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid task count `{value}`")))
}

#[cfg(test)]
mod tests {
    use super::{SqliteTaskRepository, TaskRepository};
    use crate::db::open_db_in_memory;
    use crate::model::category::Category;
    use crate::model::task::{Priority, Task};
    use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
    use crate::repo::RepoError;

    #[test]
    fn corrupted_priority_is_reported_as_invalid_data() {
        let conn = open_db_in_memory().unwrap();
        let category = Category::new("Work", None, None).unwrap();
        SqliteCategoryRepository::new(&conn)
            .create_category(&category)
            .unwrap();
        let repo = SqliteTaskRepository::new(&conn);
        let task = Task::new(category.id, "report", None, Priority::High).unwrap();
        repo.create_task(&task).unwrap();

        // Bypass the CHECK constraint to simulate a row written by a foreign tool.
        conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
            .unwrap();
        conn.execute(
            "UPDATE tasks SET priority = 'urgent' WHERE id = ?1;",
            [task.id.to_string()],
        )
        .unwrap();

        let err = repo.get_task(task.id).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("urgent")));
    }

    #[test]
    fn corrupted_created_at_is_reported_as_invalid_data() {
        let conn = open_db_in_memory().unwrap();
        let category = Category::new("Work", None, None).unwrap();
        SqliteCategoryRepository::new(&conn)
            .create_category(&category)
            .unwrap();
        let repo = SqliteTaskRepository::new(&conn);
        let task = Task::new(category.id, "report", None, Priority::Low).unwrap();
        repo.create_task(&task).unwrap();

        conn.execute(
            "UPDATE tasks SET created_at = 'yesterday' WHERE id = ?1;",
            [task.id.to_string()],
        )
        .unwrap();

        let err = repo.list_tasks_by_category(category.id).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }

    #[test]
    fn schema_rejects_out_of_set_priority() {
        let conn = open_db_in_memory().unwrap();
        let category = Category::new("Work", None, None).unwrap();
        SqliteCategoryRepository::new(&conn)
            .create_category(&category)
            .unwrap();

        let result = conn.execute(
            "INSERT INTO tasks (id, category_id, title, priority, created_at)
             VALUES ('t-1', ?1, 'raw', 'urgent', '2024-01-01');",
            [category.id.to_string()],
        );
        assert!(result.is_err());
    }
}
