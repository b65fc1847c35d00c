//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod resolve;
pub(crate) mod serve;
pub(crate) mod toc;

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_server::{server_config_from_config, site_config_from_config};
use docnav_site::Site;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use toc::TocArgs;

/// Configuration arguments shared by commands that load the site.
#[derive(Args, Debug)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Route definition file (overrides config).
    #[arg(short, long)]
    routes_file: Option<PathBuf>,

    /// Remote base URL for markdown (overrides config).
    #[arg(long, env = "DOCNAV_REMOTE_URL")]
    remote_url: Option<String>,
}

impl ConfigArgs {
    /// Load configuration with these arguments applied.
    pub(crate) fn load(&self, host: Option<String>, port: Option<u16>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            host,
            port,
            source_dir: self.source_dir.clone(),
            routes_file: self.routes_file.clone(),
            remote_url: self.remote_url.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build the site described by `config`.
pub(crate) fn open_site(config: &Config) -> Result<Site, CliError> {
    let server_config = server_config_from_config(config);
    tracing::debug!(
        source_dir = %server_config.source_dir.display(),
        remote_url = ?server_config.remote_url,
        "Opening content storage"
    );
    let storage = docnav_storage::open_storage(
        server_config.source_dir,
        server_config.remote_url.as_deref(),
    );
    Ok(Site::open(&site_config_from_config(config), storage)?)
}
