//! HTTP server for the docnav documentation resolver.
//!
//! This crate provides a JSON API over a [`Site`] using axum:
//! - `GET /api/navigation?path=...`: sidebar state for a path
//! - `GET /api/pages/{*path}`: assembled page view
//! - `GET /api/routes`: flattened route table
//!
//! # Quick Start
//!
//! ```ignore
//! use docnav_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use docnav_config::PagerStyle;
use docnav_site::{PagerMode, Site, SiteConfig};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Markdown source directory.
    pub source_dir: PathBuf,
    /// Remote base URL for markdown (`None` reads from `source_dir`).
    pub remote_url: Option<String>,
    /// Site configuration.
    pub site: SiteConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            source_dir: PathBuf::from("docs"),
            remote_url: None,
            site: SiteConfig::default(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the route table cannot be built or the server fails
/// to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = docnav_storage::open_storage(config.source_dir.clone(), config.remote_url.as_deref());
    let site = Arc::new(Site::open(&config.site, storage)?);

    let state = Arc::new(AppState { site });
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Map the configured pager style to the site's pager mode.
#[must_use]
pub fn pager_mode(style: PagerStyle) -> PagerMode {
    match style {
        PagerStyle::ReadingOrder => PagerMode::ReadingOrder,
        PagerStyle::Siblings => PagerMode::Siblings,
    }
}

/// Site configuration from docnav config.
#[must_use]
pub fn site_config_from_config(config: &docnav_config::Config) -> SiteConfig {
    SiteConfig {
        routes_file: config.docs_resolved.routes_file.clone(),
        base_path: config.docs_resolved.base_path.clone(),
        default_section: config.navigation.default_section.clone(),
        pager: pager_mode(config.navigation.pager),
        ..SiteConfig::default()
    }
}

/// Create server configuration from docnav config.
#[must_use]
pub fn server_config_from_config(config: &docnav_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.docs_resolved.source_dir.clone(),
        remote_url: config.docs_resolved.remote_url.clone(),
        site: site_config_from_config(config),
    }
}

#[cfg(test)]
mod tests {
    use docnav_config::{CliSettings, Config};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_config_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("docnav.toml");
        std::fs::write(
            &config_path,
            "[docs]\nsource_dir = \"content\"\n\n[navigation]\ndefault_section = \"/docs/guide\"\npager = \"siblings\"\n",
        )
        .unwrap();
        let settings = CliSettings {
            port: Some(9000),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();

        let server = server_config_from_config(&config);

        assert_eq!(server.port, 9000);
        assert_eq!(server.source_dir, dir.path().join("content"));
        assert_eq!(server.site.base_path, "/docs");
        assert_eq!(server.site.pager, PagerMode::Siblings);
        assert_eq!(server.site.default_section.as_deref(), Some("/docs/guide"));
        assert!(server.site.routes_file.ends_with("routes.yaml"));
    }

    #[test]
    fn test_pager_mode_mapping() {
        assert_eq!(pager_mode(PagerStyle::Siblings), PagerMode::Siblings);
        assert_eq!(pager_mode(PagerStyle::ReadingOrder), PagerMode::ReadingOrder);
    }
}
