//! dirmodel CLI
//!
//! Validates the directory layout declared in a schema document against the
//! filesystem and prints the resulting tree.

mod cli;
mod error;

use std::io::IsTerminal;

use clap::Parser;
use colored::Colorize;
use dirmodel_core::{RenderStyle, load_schema};
use dirmodel_fs::RealFs;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    // Variables already set in the environment take precedence over `.env`.
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    let tree = load_schema(&cli.schema)?;
    let validated = tree.validate()?;

    let style = if cli.no_color || !std::io::stdout().is_terminal() {
        RenderStyle::Plain
    } else {
        RenderStyle::Color
    };
    print!("{}", validated.render(&RealFs, style));
    println!(
        "{}",
        "Validation successful! All directories are in place.".green()
    );
    Ok(())
}

/// Log to stderr: INFO by default, DEBUG with `--verbose`, or whatever `RUST_LOG` says.
fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!("Verbose mode enabled");
    Ok(())
}
