//! Core persistence and state-consistency layer for the tasknest task manager.
//! This crate is the single source of truth for entity and session invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use config::DataPaths;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId, DEFAULT_CATEGORY_COLOR};
pub use model::task::{Priority, Task, TaskId};
pub use model::validation::ValidationError;
pub use repo::task_repo::TaskCounts;
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::startup::{remember_category, restore_view, StartupView};
pub use service::store::{Store, StoreError, StoreResult};
pub use session::{SessionError, SessionOptions, SessionState, LAST_CATEGORY_ID_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
