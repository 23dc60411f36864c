//! Category repository contract and SQLite implementation.
//!
//! # Invariants
//! - Category names are unique; conflicts surface as
//!   `ValidationError::DuplicateCategoryName`, never as raw SQLite errors.
//! - Listing order is creation order (`rowid ASC`).
//! - Deleting a category removes its tasks in the same transaction.

use super::{is_constraint_violation, parse_uuid, RepoError, RepoResult};
use crate::model::category::{Category, CategoryId};
use crate::model::validation::ValidationError;
use log::debug;
use rusqlite::{ffi, params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const CATEGORY_SELECT_SQL: &str = "SELECT
    id,
    name,
    icon,
    color
FROM categories";

/// Repository interface for category persistence.
pub trait CategoryRepository {
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId>;
    fn update_category(&self, category: &Category) -> RepoResult<()>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Removes the category and every task it owns, all-or-nothing.
    ///
    /// Returns the number of removed tasks.
    fn delete_category_cascade(&self, id: CategoryId) -> RepoResult<usize>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId> {
        category.validate()?;
        ensure_name_available(self.conn, &category.name, None)?;

        self.conn
            .execute(
                "INSERT INTO categories (
                    id,
                    name,
                    icon,
                    color
                ) VALUES (?1, ?2, ?3, ?4);",
                params![
                    category.id.to_string(),
                    category.name.as_str(),
                    category.icon.as_deref(),
                    category.color.as_str(),
                ],
            )
            .map_err(|err| map_name_conflict(err, &category.name))?;

        Ok(category.id)
    }

    fn update_category(&self, category: &Category) -> RepoResult<()> {
        category.validate()?;
        if !category_exists(self.conn, category.id)? {
            return Err(RepoError::category_not_found(category.id));
        }
        ensure_name_available(self.conn, &category.name, Some(category.id))?;

        let changed = self
            .conn
            .execute(
                "UPDATE categories
                 SET
                    name = ?2,
                    icon = ?3,
                    color = ?4
                 WHERE id = ?1;",
                params![
                    category.id.to_string(),
                    category.name.as_str(),
                    category.icon.as_deref(),
                    category.color.as_str(),
                ],
            )
            .map_err(|err| map_name_conflict(err, &category.name))?;

        if changed == 0 {
            return Err(RepoError::category_not_found(category.id));
        }

        Ok(())
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }
        Ok(None)
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn delete_category_cascade(&self, id: CategoryId) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !category_exists(&tx, id)? {
            return Err(RepoError::category_not_found(id));
        }

        let removed_tasks = tx.execute(
            "DELETE FROM tasks
             WHERE category_id = ?1;",
            [id.to_string()],
        )?;
        tx.execute(
            "DELETE FROM categories
             WHERE id = ?1;",
            [id.to_string()],
        )?;

        tx.commit()?;
        debug!(
            "event=category_cascade module=repo status=ok category_id={id} tasks_removed={removed_tasks}"
        );
        Ok(removed_tasks)
    }
}

pub(crate) fn category_exists(conn: &Connection, id: CategoryId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM categories
            WHERE id = ?1
        );",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn ensure_name_available(
    conn: &Connection,
    name: &str,
    exclude_id: Option<CategoryId>,
) -> RepoResult<()> {
    let owner: Option<String> = conn
        .query_row(
            "SELECT id
             FROM categories
             WHERE name = ?1;",
            [name],
            |row| row.get(0),
        )
        .optional()?;

    let Some(owner) = owner else {
        return Ok(());
    };
    let owner = parse_uuid(&owner, "categories.id")?;
    if Some(owner) == exclude_id {
        return Ok(());
    }
    Err(ValidationError::DuplicateCategoryName(name.to_string()).into())
}

fn map_name_conflict(err: rusqlite::Error, name: &str) -> RepoError {
    if is_constraint_violation(&err, ffi::SQLITE_CONSTRAINT_UNIQUE) {
        return ValidationError::DuplicateCategoryName(name.to_string()).into();
    }
    err.into()
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let id_text: String = row.get("id")?;
    let category = Category {
        id: parse_uuid(&id_text, "categories.id")?,
        name: row.get("name")?,
        icon: row.get("icon")?,
        color: row.get("color")?,
    };
    category
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("{err} in categories.name")))?;
    Ok(category)
}
