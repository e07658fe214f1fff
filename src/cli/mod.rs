//! Command line interface for logoforge_export.
//!
//! Three subcommands share one engine: `serve` runs the HTTP endpoint,
//! `export` renders a local file to a ZIP, `catalog` prints the icon tables.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
