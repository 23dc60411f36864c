//! Domain model for categories and their tasks.
//!
//! # Responsibility
//! - Define the canonical records shared by storage and callers.
//! - Own field-level validation and input normalization.
//!
//! # Invariants
//! - Every record is identified by a stable id assigned at creation.
//! - A `Task` always names exactly one owning `Category`.
//! - Names and titles are stored trimmed and never blank.

pub mod category;
pub mod task;
pub mod validation;

/// Trims a required text field; returns `None` when nothing is left.
pub(crate) fn normalize_required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trims an optional text field, collapsing blank input to `None`.
pub(crate) fn normalize_optional(value: Option<&str>) -> Option<String> {
    value.and_then(normalize_required)
}
