//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for loading markdown content, along
//! with [`StorageError`] for unified error handling across backends.
//!
//! # Markdown Paths
//!
//! All path parameters are **markdown paths** taken from the route table,
//! relative to the content root:
//! - `"quick-start/installation.md"`
//! - `"/core-component/log/rotate.md"` (a leading slash is ignored)

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Operation timed out.
    Timeout,
    /// Other/unknown error category.
    Other,
}

/// Retry guidance.
///
/// Informational only: the resolver never retries a failed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    /// Retrying will not help (not found, invalid path).
    #[default]
    Permanent,
    /// A later attempt may succeed (timeout, unavailable backend).
    Temporary,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Retry guidance.
    pub status: ErrorStatus,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Http", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        let status = match kind {
            StorageErrorKind::Unavailable | StorageErrorKind::Timeout => ErrorStatus::Temporary,
            _ => ErrorStatus::Permanent,
        };
        Self {
            kind,
            status,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set retry status.
    #[must_use]
    pub fn with_status(mut self, status: ErrorStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Path context, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    /// Whether the resource is known not to exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => StorageErrorKind::Timeout,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: foo/bar.md)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Unavailable => "Unavailable",
            StorageErrorKind::Timeout => "Timeout",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Markdown content loader.
///
/// Implementations must be safe to share between concurrent page views.
/// They are never asked to retry: a failed `read` is reported once and the
/// page is shown without content.
pub trait Storage: Send + Sync {
    /// Read the full markdown text for a markdown path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::NotFound`] if the
    /// resource does not exist, or another kind if it can't be read.
    fn read(&self, markdown_path: &str) -> Result<String, StorageError>;

    /// Check if a markdown resource exists.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, markdown_path: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_storage_error_display_full() {
        let err = StorageError::new(StorageErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("guide.md");

        assert_eq!(err.to_string(), "[Fs] Not found (path: guide.md)");
    }

    #[test]
    fn test_storage_error_display_with_source() {
        let io = std::io::Error::other("disk on fire");
        let err = StorageError::new(StorageErrorKind::Other).with_source(io);

        assert_eq!(err.to_string(), "Error: disk on fire");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_storage_error_io_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = StorageError::io(io, Some(PathBuf::from("a.md")));

        assert!(err.is_not_found());
        assert_eq!(err.status, ErrorStatus::Permanent);
        assert_eq!(err.path(), Some(std::path::Path::new("a.md")));
    }

    #[test]
    fn test_storage_error_io_timeout_is_temporary() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        let err = StorageError::io(io, None);

        assert_eq!(err.kind(), StorageErrorKind::Timeout);
        assert_eq!(err.status, ErrorStatus::Temporary);
    }

    #[test]
    fn test_storage_error_unavailable_is_temporary() {
        let err = StorageError::new(StorageErrorKind::Unavailable);

        assert_eq!(err.status, ErrorStatus::Temporary);
    }
}
