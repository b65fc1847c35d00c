//! Markdown content loading for the docnav documentation resolver.
//!
//! This crate provides a [`Storage`] trait that hides where markdown pages
//! come from. The route table only knows a page's markdown path; a storage
//! backend turns that path into text:
//!
//! - [`FsStorage`] reads files below a local source directory
//! - [`HttpStorage`] fetches files from a remote base URL
//! - [`MockStorage`] keeps content in memory (behind the `mock` feature)
//!
//! Loading failures are reported as [`StorageError`] with a semantic
//! [`StorageErrorKind`]. Callers never retry; any failure means the page has
//! no content.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use docnav_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! let markdown = storage.read("quick-start/installation.md")?;
//! # Ok::<(), docnav_storage::StorageError>(())
//! ```

mod fs;
mod http;
#[cfg(feature = "mock")]
mod mock;
mod storage;

use std::path::PathBuf;
use std::sync::Arc;

pub use fs::FsStorage;
pub use http::HttpStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{ErrorStatus, Storage, StorageError, StorageErrorKind};

/// Create the storage backend for a content location.
///
/// A `remote_url` takes precedence over the local `source_dir`.
#[must_use]
pub fn open_storage(source_dir: PathBuf, remote_url: Option<&str>) -> Arc<dyn Storage> {
    match remote_url {
        Some(url) => Arc::new(HttpStorage::new(url)),
        None => Arc::new(FsStorage::new(source_dir)),
    }
}
