//! Startup and selection bookkeeping shared by every shell.
//!
//! # Invariants
//! - A remembered category is only selected when it still exists.
//! - Session write failures never abort the caller.

use crate::model::category::{Category, CategoryId};
use crate::model::task::Task;
use crate::service::store::{Store, StoreResult};
use crate::session::SessionState;
use log::{debug, warn};

/// Initial view state restored at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupView {
    pub categories: Vec<Category>,
    /// Remembered category, present only if it still resolves.
    pub selected: Option<CategoryId>,
    /// Tasks of `selected`; empty when nothing is selected.
    pub tasks: Vec<Task>,
}

/// Loads categories and re-selects the last viewed one.
///
/// Stale or unparseable remembered ids are ignored.
pub fn restore_view(store: &Store, session: &SessionState) -> StoreResult<StartupView> {
    let categories = store.list_categories()?;
    let remembered = session.load().last_category_id();
    let selected =
        remembered.filter(|id| categories.iter().any(|category| category.id == *id));

    if let (Some(id), None) = (remembered, selected) {
        debug!("event=startup_restore module=startup status=stale category_id={id}");
    }

    let tasks = match selected {
        Some(id) => store.list_tasks_by_category(id)?,
        None => Vec::new(),
    };

    Ok(StartupView {
        categories,
        selected,
        tasks,
    })
}

/// Persists the active category, keeping every other option intact.
///
/// Returns whether the record was written. Failures are logged only.
pub fn remember_category(session: &SessionState, category_id: Option<CategoryId>) -> bool {
    let mut options = session.load();
    options.set_last_category_id(category_id);
    match session.save(&options) {
        Ok(()) => true,
        Err(err) => {
            warn!("event=session_remember module=startup status=error error={err}");
            false
        }
    }
}
