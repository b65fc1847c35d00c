//! `docnav toc` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_site::{Heading, extract_headings};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Markdown file to read.
    file: PathBuf,

    /// Print the outline as JSON.
    #[arg(long)]
    json: bool,
}

impl TocArgs {
    /// Execute the toc command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let markdown = std::fs::read_to_string(&self.file)?;
        let headings = extract_headings(&markdown);

        if self.json {
            output.data(&serde_json::to_string_pretty(&headings)?)?;
            return Ok(());
        }

        if headings.is_empty() {
            output.info(&format!("No headings in {}", self.file.display()));
        }
        for line in format_outline(&headings) {
            output.data(&line)?;
        }
        Ok(())
    }
}

/// Indented outline lines, level 3 nested under level 2.
fn format_outline(headings: &[Heading]) -> Vec<String> {
    headings
        .iter()
        .map(|heading| {
            let indent = "  ".repeat(usize::from(heading.level.saturating_sub(2)));
            format!("{indent}{} ({})", heading.text, heading.slug)
        })
        .collect()
}
