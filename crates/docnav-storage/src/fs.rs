//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading markdown pages from a local source
//! directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Markdown paths are resolved relative to `source_dir`. A leading slash is
/// ignored, so `/quick-start/example.md` and `quick-start/example.md` name
/// the same file.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use docnav_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let text = storage.read("quick-start/example.md")?;
/// # Ok::<(), docnav_storage::StorageError>(())
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Root directory for markdown files.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Root directory for markdown files.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Validate that a path doesn't escape the source directory.
    ///
    /// Rejects paths containing parent directory components (`..`) to prevent
    /// path traversal (e.g., `../../../etc/passwd`).
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let has_parent_dir = path.components().any(|c| matches!(c, Component::ParentDir));

        if has_parent_dir {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Map a markdown path to a file below the source directory.
    fn resolve(&self, markdown_path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(markdown_path.trim_start_matches('/'));
        Self::validate_path(relative)?;
        Ok(self.source_dir.join(relative))
    }
}

impl Storage for FsStorage {
    fn read(&self, markdown_path: &str) -> Result<String, StorageError> {
        let full_path = self.resolve(markdown_path)?;
        fs::read_to_string(&full_path).map_err(|e| {
            StorageError::io(e, Some(PathBuf::from(markdown_path))).with_backend(BACKEND)
        })
    }

    fn exists(&self, markdown_path: &str) -> bool {
        self.resolve(markdown_path)
            .is_ok_and(|full_path| full_path.is_file())
    }
}
