//! docnav CLI - Documentation navigation resolver.
//!
//! Provides commands for:
//! - `serve`: Start the JSON API server
//! - `check`: Validate the route table and report missing markdown
//! - `toc`: Print the heading outline of a markdown file
//! - `resolve`: Print the assembled page view for a path

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ResolveArgs, ServeArgs, TocArgs};
use error::CliError;
use output::Output;

/// docnav - Documentation navigation resolver.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the documentation API server.
    Serve(ServeArgs),
    /// Validate routes and report missing markdown resources.
    Check(CheckArgs),
    /// Print the heading outline of a markdown file.
    Toc(TocArgs),
    /// Resolve a path and print the page view as JSON.
    Resolve(ResolveArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => run_async(args),
        Commands::Check(args) => args.execute(),
        Commands::Toc(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run_async(args: ServeArgs) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(args.execute())
}
