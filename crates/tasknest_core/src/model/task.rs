//! Task domain model.
//!
//! # Invariants
//! - `category_id` references exactly one live category; tasks never
//!   outlive their category.
//! - `created_at` is set once at creation and never modified.
//! - `priority` is a closed set serialized by its lowercase tag.

use super::category::CategoryId;
use super::validation::ValidationError;
use super::{normalize_optional, normalize_required};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a task.
pub type TaskId = Uuid;

/// Task priority.
///
/// The lowercase tag (`low`, `medium`, `high`) is the stable storage and
/// wire representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses an exact storage tag.
    pub(crate) fn from_tag(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses user input; surrounding whitespace and ASCII case are ignored.
impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_tag(value.trim().to_ascii_lowercase().as_str())
            .ok_or_else(|| ValidationError::InvalidPriority(value.to_string()))
    }
}

/// To-do item owned by one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub category_id: CategoryId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    /// Kept in the schema; no operation sets it today.
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDate,
}

impl Task {
    /// Builds a new, not yet completed task dated today (local time).
    pub fn new(
        category_id: CategoryId,
        title: &str,
        description: Option<&str>,
        priority: Priority,
    ) -> Result<Self, ValidationError> {
        let title = normalize_required(title).ok_or(ValidationError::EmptyTaskTitle)?;
        Ok(Self {
            id: Uuid::new_v4(),
            category_id,
            title,
            description: normalize_optional(description),
            completed: false,
            priority,
            due_date: None,
            created_at: Local::now().date_naive(),
        })
    }

    /// Replaces the editable fields. `category_id`, `completed` and
    /// `created_at` are never touched.
    ///
    /// On error the task is left unchanged.
    pub fn apply_edit(
        &mut self,
        title: &str,
        description: Option<&str>,
        priority: Priority,
    ) -> Result<(), ValidationError> {
        let title = normalize_required(title).ok_or(ValidationError::EmptyTaskTitle)?;
        self.title = title;
        self.description = normalize_optional(description);
        self.priority = priority;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTaskTitle);
        }
        Ok(())
    }
}
