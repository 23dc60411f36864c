//! On-disk session record: load with fallback to empty, save by atomic replace.

use super::options::SessionOptions;
use log::{debug, info, warn};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Unrecoverable write failure (permissions, disk full).
    #[error("failed to write session state `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// File-backed session record.
#[derive(Debug, Clone)]
pub struct SessionState {
    path: PathBuf,
}

impl SessionState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted options.
    ///
    /// Never fails: a missing, unreadable or malformed record yields empty
    /// options.
    pub fn load(&self) -> SessionOptions {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("event=session_load module=session status=empty reason=missing");
                return SessionOptions::new();
            }
            Err(err) => {
                warn!(
                    "event=session_load module=session status=empty reason=unreadable error={err}"
                );
                return SessionOptions::new();
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(entries)) => {
                let options = SessionOptions::from(entries);
                debug!(
                    "event=session_load module=session status=ok keys={}",
                    options.len()
                );
                options
            }
            Ok(_) => {
                warn!("event=session_load module=session status=empty reason=not_an_object");
                SessionOptions::new()
            }
            Err(err) => {
                warn!("event=session_load module=session status=empty reason=malformed error={err}");
                SessionOptions::new()
            }
        }
    }

    /// Replaces the whole persisted record with `options`.
    ///
    /// The record is written to a sibling temp file and renamed into place,
    /// so readers see either the old or the new record.
    pub fn save(&self, options: &SessionOptions) -> Result<(), SessionError> {
        self.write_atomically(options).map_err(|source| {
            warn!("event=session_save module=session status=error error={source}");
            SessionError::Io {
                path: self.path.clone(),
                source,
            }
        })?;
        info!(
            "event=session_save module=session status=ok keys={}",
            options.len()
        );
        Ok(())
    }

    fn write_atomically(&self, options: &SessionOptions) -> io::Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut file = NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(&mut file, options)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SessionState;
    use crate::session::SessionOptions;
    use std::fs;

    #[test]
    fn missing_record_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = SessionState::new(dir.path().join("session.json"));
        assert!(state.load().is_empty());
    }

    #[test]
    fn malformed_records_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let state = SessionState::new(&path);

        for content in ["{not json", "[1, 2, 3]", "42", "", "\u{0}\u{1}"] {
            fs::write(&path, content).unwrap();
            assert!(state.load().is_empty(), "content {content:?} should load empty");
        }
    }

    #[test]
    fn directory_in_place_of_record_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::create_dir(&path).unwrap();

        assert!(SessionState::new(&path).load().is_empty());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let state = SessionState::new(&path);

        let mut options = SessionOptions::new();
        options.set("theme", "dark");
        state.save(&options).unwrap();

        assert!(path.is_file());
        assert_eq!(state.load(), options);
    }

    #[test]
    fn save_into_unwritable_location_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let state = SessionState::new(blocker.join("session.json"));

        assert!(state.save(&SessionOptions::new()).is_err());
    }
}
