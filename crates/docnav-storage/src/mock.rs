//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Stores markdown content in memory. Use the builder methods to configure
/// the mock with test data, including forced failures.
///
/// # Example
///
/// ```ignore
/// use docnav_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_content("guide.md", "# User Guide\n\nContent.");
///
/// let content = storage.read("guide.md").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    contents: RwLock<HashMap<String, String>>,
    failures: RwLock<HashMap<String, StorageErrorKind>>,
}

/// Normalize a markdown path to the key used by the mock.
fn key(markdown_path: &str) -> String {
    markdown_path.trim_start_matches('/').to_owned()
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add content for a markdown path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_content(self, markdown_path: &str, content: impl Into<String>) -> Self {
        self.contents
            .write()
            .unwrap()
            .insert(key(markdown_path), content.into());
        self
    }

    /// Make reads of a markdown path fail with the given kind.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, markdown_path: &str, kind: StorageErrorKind) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(key(markdown_path), kind);
        self
    }
}

impl Storage for MockStorage {
    fn read(&self, markdown_path: &str) -> Result<String, StorageError> {
        let key = key(markdown_path);

        if let Some(&kind) = self.failures.read().unwrap().get(&key) {
            return Err(StorageError::new(kind)
                .with_path(markdown_path)
                .with_backend("Mock"));
        }

        self.contents
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(markdown_path).with_backend("Mock"))
    }

    fn exists(&self, markdown_path: &str) -> bool {
        self.contents
            .read()
            .unwrap()
            .contains_key(&key(markdown_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_read_returns_content() {
        let storage = MockStorage::new().with_content("guide.md", "# Guide");

        assert_eq!(storage.read("guide.md").unwrap(), "# Guide");
        assert_eq!(storage.read("/guide.md").unwrap(), "# Guide");
    }

    #[test]
    fn test_mock_read_missing_is_not_found() {
        let storage = MockStorage::new();

        let err = storage.read("missing.md").unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_mock_forced_failure() {
        let storage = MockStorage::new()
            .with_content("guide.md", "# Guide")
            .with_failure("guide.md", StorageErrorKind::Unavailable);

        let err = storage.read("guide.md").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::Unavailable);
    }

    #[test]
    fn test_mock_exists() {
        let storage = MockStorage::new().with_content("guide.md", "# Guide");

        assert!(storage.exists("guide.md"));
        assert!(!storage.exists("other.md"));
    }
}
