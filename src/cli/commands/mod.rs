//! Command execution for the export CLI.

mod catalog;
mod export;
mod serve;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

use catalog::execute_catalog;
use export::execute_export;
use serve::execute_serve;

/// Execute the selected subcommand and map its outcome to an exit code.
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::Serve { .. } => execute_serve(&args, &config).await,
        Command::Export { .. } => execute_export(&args, &config).await,
        Command::Catalog { .. } => execute_catalog(&args, &config),
    };

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            config.error_println(&format!("Command '{}' failed: {}", args.command.name(), e));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.println(&format!("  • {}", suggestion));
                }
            }

            Ok(1)
        }
    }
}
