//! Route definition file loading.
//!
//! The route tree lives in a YAML file (`routes.yaml` by default) holding a
//! list of nodes:
//!
//! ```yaml
//! - name: Core Component
//!   path: /docs/core-component
//!   children:
//!     - name: Log
//!       path: /docs/core-component/log
//!       markdown: core-component/log.md
//! ```

use std::path::{Path, PathBuf};

use crate::route_table::RouteNode;

/// Error returned when the route definition file cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum RoutesFileError {
    /// File could not be read.
    #[error("Failed to read routes file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File content is not a valid route list.
    #[error("Invalid routes definition: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load route definitions from a YAML file.
pub fn load_routes(path: &Path) -> Result<Vec<RouteNode>, RoutesFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| RoutesFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let nodes = parse_routes(&content)?;
    tracing::debug!(path = %path.display(), roots = nodes.len(), "Loaded route definitions");
    Ok(nodes)
}

/// Parse route definitions from YAML text.
///
/// An empty document yields an empty list.
pub fn parse_routes(content: &str) -> Result<Vec<RouteNode>, RoutesFileError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(content)?)
}
