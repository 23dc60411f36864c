//! On-disk layout of the application data directory.
//!
//! The entity database and the session record are separate files so that
//! corrupting one never affects the other.

use std::io;
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "tasks.db";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    data_dir: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    /// Creates the data directory if it does not exist yet.
    pub fn ensure_exists(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::DataPaths;

    #[test]
    fn entity_and_session_files_are_distinct() {
        let paths = DataPaths::new("/tmp/tasknest");
        assert_ne!(paths.db_path(), paths.session_path());
        assert!(paths.db_path().starts_with(paths.data_dir()));
        assert!(paths.log_dir().ends_with("logs"));
    }

    #[test]
    fn ensure_exists_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path().join("a").join("b"));
        paths.ensure_exists().unwrap();
        assert!(paths.data_dir().is_dir());
    }
}
