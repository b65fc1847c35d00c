//! Remote storage implementation.
//!
//! Provides [`HttpStorage`] for fetching markdown pages from a web server,
//! such as a raw file endpoint of a documentation repository.

use std::time::Duration;

use ureq::Agent;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Http";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// HTTP storage implementation.
///
/// Markdown paths are appended to `base_url`. A `404` response is reported
/// as [`StorageErrorKind::NotFound`]; server errors and transport failures
/// as [`StorageErrorKind::Unavailable`] or [`StorageErrorKind::Timeout`].
pub struct HttpStorage {
    agent: Agent,
    base_url: String,
}

impl HttpStorage {
    /// Create a storage that fetches pages below `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Build the URL for a markdown path.
    fn url_for(&self, markdown_path: &str) -> String {
        format!("{}/{}", self.base_url, markdown_path.trim_start_matches('/'))
    }
}

/// Map an HTTP status code to an error kind.
fn kind_for_status(status: u16) -> StorageErrorKind {
    match status {
        404 | 410 => StorageErrorKind::NotFound,
        401 | 403 => StorageErrorKind::PermissionDenied,
        400 => StorageErrorKind::InvalidPath,
        408 | 504 => StorageErrorKind::Timeout,
        s if s >= 500 => StorageErrorKind::Unavailable,
        _ => StorageErrorKind::Other,
    }
}

/// Map a transport error to a storage error.
fn transport_error(err: ureq::Error, markdown_path: &str) -> StorageError {
    let kind = match &err {
        ureq::Error::Timeout(_) => StorageErrorKind::Timeout,
        _ => StorageErrorKind::Unavailable,
    };
    StorageError::new(kind)
        .with_path(markdown_path)
        .with_backend(BACKEND)
        .with_source(err)
}

impl Storage for HttpStorage {
    fn read(&self, markdown_path: &str) -> Result<String, StorageError> {
        let url = self.url_for(markdown_path);
        tracing::debug!(url = %url, "Fetching markdown");

        let response = self
            .agent
            .get(&url)
            .header("Accept", "text/markdown, text/plain")
            .call()
            .map_err(|e| transport_error(e, markdown_path))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(StorageError::new(kind_for_status(status))
                .with_path(markdown_path)
                .with_backend(BACKEND));
        }

        let mut body = response.into_body();
        body.read_to_string()
            .map_err(|e| transport_error(e, markdown_path))
    }

    fn exists(&self, markdown_path: &str) -> bool {
        let url = self.url_for(markdown_path);
        self.agent
            .head(&url)
            .call()
            .is_ok_and(|response| response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use pretty_assertions::assert_eq;

    use super::*;

    /// Serve one canned response on a local port and return its base URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            loop {
                line.clear();
                let read = reader.read_line(&mut line).unwrap();
                if read == 0 || line == "\r\n" {
                    break;
                }
            }
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_url_for_joins_paths() {
        let storage = HttpStorage::new("https://docs.example.com/raw/");

        assert_eq!(
            storage.url_for("/quick-start/example.md"),
            "https://docs.example.com/raw/quick-start/example.md"
        );
        assert_eq!(
            storage.url_for("log/rotate.md"),
            "https://docs.example.com/raw/log/rotate.md"
        );
    }

    #[test]
    fn test_kind_for_status() {
        assert_eq!(kind_for_status(404), StorageErrorKind::NotFound);
        assert_eq!(kind_for_status(403), StorageErrorKind::PermissionDenied);
        assert_eq!(kind_for_status(503), StorageErrorKind::Unavailable);
        assert_eq!(kind_for_status(504), StorageErrorKind::Timeout);
        assert_eq!(kind_for_status(418), StorageErrorKind::Other);
    }

    #[test]
    fn test_read_returns_body() {
        let storage = HttpStorage::new(&serve_once("200 OK", "## Hi"));

        assert_eq!(storage.read("guide.md").unwrap(), "## Hi");
    }

    #[test]
    fn test_read_not_found() {
        let storage = HttpStorage::new(&serve_once("404 Not Found", ""));

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some(BACKEND));
    }

    #[test]
    fn test_read_server_error_is_unavailable() {
        let storage = HttpStorage::new(&serve_once("503 Service Unavailable", ""));

        let err = storage.read("guide.md").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::Unavailable);
    }

    #[test]
    fn test_read_connection_refused_is_unavailable() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let storage = HttpStorage::new(&format!("http://{addr}"));

        let err = storage.read("guide.md").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::Unavailable);
    }

    #[test]
    fn test_exists() {
        let found = HttpStorage::new(&serve_once("200 OK", ""));
        let missing = HttpStorage::new(&serve_once("404 Not Found", ""));

        assert!(found.exists("guide.md"));
        assert!(!missing.exists("missing.md"));
    }
}
