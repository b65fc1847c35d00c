//! `docnav resolve` command implementation.

use clap::Args;
use docnav_site::PageView;

use crate::commands::{ConfigArgs, open_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Request path (e.g., /docs/core-component/log).
    path: String,

    #[command(flatten)]
    config: ConfigArgs,

    /// Print only the navigation state.
    #[arg(long)]
    navigation: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.config.load(None, None)?;
        let site = open_site(&config)?;

        let json = if self.navigation {
            serde_json::to_string_pretty(&site.navigation(&self.path))?
        } else {
            let view = site.page(&self.path);
            report(&output, &view);
            serde_json::to_string_pretty(&view)?
        };

        output.data(&json)?;
        Ok(())
    }
}

fn report(output: &Output, view: &PageView) {
    match &view.route {
        Some(route) => output.info(&format!("{} -> {}", view.path, route.title)),
        None => output.warning(&format!("No route for {}", view.path)),
    }
}
