//! Category domain model.
//!
//! # Invariants
//! - `id` is assigned once and never reused for another category.
//! - `name` is trimmed, non-empty, and unique across all categories
//!   (uniqueness is enforced by the repository at write time).
//! - `color` is always present; missing input falls back to
//!   [`DEFAULT_CATEGORY_COLOR`].

use super::validation::ValidationError;
use super::{normalize_optional, normalize_required};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a category.
pub type CategoryId = Uuid;

/// Color applied when a category is created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3498db";

/// Named grouping that owns zero or more tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Free-form icon reference; no format constraint.
    pub icon: Option<String>,
    pub color: String,
}

impl Category {
    /// Builds a new category with a freshly generated id.
    ///
    /// Blank `icon`/`color` input is treated as not supplied.
    pub fn new(
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let mut category = Self {
            id: Uuid::new_v4(),
            name: String::new(),
            icon: None,
            color: DEFAULT_CATEGORY_COLOR.to_string(),
        };
        category.apply_edit(name, icon, color)?;
        Ok(category)
    }

    /// Renames and restyles this category in place. The id is untouched.
    ///
    /// On error the category is left unchanged.
    pub fn apply_edit(
        &mut self,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> Result<(), ValidationError> {
        let name = normalize_required(name).ok_or(ValidationError::EmptyCategoryName)?;
        self.name = name;
        self.icon = normalize_optional(icon);
        self.color =
            normalize_optional(color).unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());
        Ok(())
    }

    /// Checks field constraints that do not need storage access.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        Ok(())
    }
}
