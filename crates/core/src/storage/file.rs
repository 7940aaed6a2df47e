//! File-backed slot storage.
//!
//! # Layout
//!
//! ```text
//! {dir}/
//! ├── menuApp_cart.json       # one file per slot
//! └── menuApp_cart.json.tmp   # only while a write is in flight
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{CartStorage, StorageError, validate_slot};

/// Stores each slot as `{dir}/{slot}.json`.
///
/// The directory is created on first write. Writes go to a temp file that is
/// then renamed over the slot file, so a crash never leaves a half-written
/// slot behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory slots are stored in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidSlot`] for names that are not safe file stems.
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf, StorageError> {
        validate_slot(slot)?;
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

impl CartStorage for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.slot_path(slot)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn write(&self, slot: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;
        fs::create_dir_all(&self.dir)?;

        let temp_path = self.dir.join(format!("{slot}.json.tmp"));
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::trace!(path = %path.display(), bytes = bytes.len(), "Slot written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.read("menuApp_cart").unwrap().is_none());
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("data"));

        storage.write("menuApp_cart", b"[]").unwrap();

        let path = storage.slot_path("menuApp_cart").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"[]");
        assert!(!storage.dir().join("menuApp_cart.json.tmp").exists());
        assert_eq!(storage.read("menuApp_cart").unwrap().unwrap(), b"[]");
    }

    #[test]
    fn test_rejects_path_like_slot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.write("../escape", b"x"),
            Err(StorageError::InvalidSlot(_))
        ));
    }
}
