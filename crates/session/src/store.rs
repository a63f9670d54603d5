//! Durable storage for the selected project identifier.
//!
//! One key, one plain string value. [`FileSessionStore`] keeps it in a file
//! named after [`CURRENT_PROJECT_KEY`] inside a state directory so it
//! survives restarts; [`MemorySessionStore`] keeps it in process.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage key of the last selected project id.
pub const CURRENT_PROJECT_KEY: &str = "current_project_id";

/// Key-value storage for the session's persisted identifier.
pub trait SessionStore {
    /// The stored value, or `None` if nothing is stored.
    fn load(&self) -> io::Result<Option<String>>;

    /// Store `value`, replacing whatever was there.
    fn save(&self, value: &str) -> io::Result<()>;

    /// Remove the stored value. Removing nothing is not an error.
    fn remove(&self) -> io::Result<()>;
}

// ---------------------------------------------------------------------------
// File-backed
// ---------------------------------------------------------------------------

/// Stores the identifier in `<dir>/current_project_id`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// The directory is created on first save.
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join(CURRENT_PROJECT_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let value = contents.trim();
                Ok((!value.is_empty()).then(|| value.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, value: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, value)
    }

    fn remove(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    value: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value`, as if written by an earlier run.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Mutex::new(Some(value.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, value: &str) -> io::Result<()> {
        *self
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> io::Result<()> {
        self.value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        Ok(())
    }
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn load(&self) -> io::Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, value: &str) -> io::Result<()> {
        (**self).save(value)
    }

    fn remove(&self) -> io::Result<()> {
        (**self).remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested"));

        assert_eq!(store.load().unwrap(), None);
        store.save("medical-core").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("medical-core"));
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "medical-core"
        );

        store.remove().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.remove().unwrap();
    }

    #[test]
    fn file_store_treats_blank_file_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        std::fs::write(store.path(), "  \n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_trims_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        std::fs::write(store.path(), "medical-core\n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("medical-core"));
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemorySessionStore::with_value("a1");
        store.save("b2").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("b2"));
        store.remove().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
