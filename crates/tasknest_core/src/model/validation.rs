//! Field-level validation errors.

use thiserror::Error;

/// Caller-supplied data violates a field constraint.
///
/// Recoverable: callers are expected to re-prompt for corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("category name must not be blank")]
    EmptyCategoryName,
    #[error("category name already in use: `{0}`")]
    DuplicateCategoryName(String),
    #[error("task title must not be blank")]
    EmptyTaskTitle,
    #[error("unsupported priority `{0}`; expected low|medium|high")]
    InvalidPriority(String),
}
