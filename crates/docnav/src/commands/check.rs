//! `docnav check` command implementation.
//!
//! Builds the route table (which validates it) and checks that every
//! route's markdown resource exists.

use clap::Args;

use crate::commands::{ConfigArgs, open_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Report missing markdown as warnings instead of failing.
    #[arg(long)]
    allow_missing: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the route table is invalid, or if markdown is
    /// missing and `--allow-missing` is not set.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.config.load(None, None)?;
        let site = open_site(&config)?;
        let table = site.table();

        output.highlight(&format!(
            "{} routes, {} sections, {} pages",
            table.len(),
            table.sections().count(),
            table.reading_order().count()
        ));

        let missing = site.missing_content();
        if missing.is_empty() {
            output.success("All markdown resources found");
            return Ok(());
        }

        output.separator();
        for entry in &missing {
            output.warning(&format!("{}: missing {}", entry.path, entry.markdown));
        }
        output.separator();

        let summary = format!("{} markdown resource(s) missing", missing.len());
        if self.allow_missing {
            output.warning(&summary);
            Ok(())
        } else {
            Err(CliError::Validation(summary))
        }
    }
}
