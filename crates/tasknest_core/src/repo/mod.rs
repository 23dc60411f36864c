//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define entity-oriented data access contracts.
//! - Isolate SQLite query details from the store facade.
//!
//! # Invariants
//! - Write paths call the model's `validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Multi-statement writes run inside one IMMEDIATE transaction.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use rusqlite::ErrorCode;
use std::fmt::{Display, Formatter};
use std::os::raw::c_int;
use thiserror::Error;
use uuid::Uuid;

pub mod category_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity kind named by not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Category,
    Task,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category => f.write_str("category"),
            Self::Task => f.write_str("task"),
        }
    }
}

/// Repository error for category/task persistence and queries.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn category_not_found(id: Uuid) -> Self {
        Self::NotFound {
            kind: EntityKind::Category,
            id,
        }
    }

    pub(crate) fn task_not_found(id: Uuid) -> Self {
        Self::NotFound {
            kind: EntityKind::Task,
            id,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error, extended_code: c_int) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == extended_code
    )
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

pub(crate) fn parse_bool(value: i64, column: &'static str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
