//! Command execution coordinating the publishing pipeline.

mod helpers;
mod publish;
mod resolve;

use crate::cli::{Args, Command, OutputManager};
use crate::error::Result;

/// Execute the main command based on parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    // Validate arguments
    if let Err(validation_error) = args.validate() {
        let output = OutputManager::new(false);
        output.error(&format!("Invalid arguments: {validation_error}"));
        return Ok(1);
    }

    let output = OutputManager::new(args.quiet);
    let command_name = args.command.name();

    let result = match args.command {
        Command::Publish {
            kind,
            repo,
            token,
            assets,
        } => publish::execute(kind, &repo, token, &assets, &output).await,
        Command::Resolve { kind, token, json } => resolve::execute(kind, token, json).await,
    };

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            output.error(&format!("Command '{command_name}' failed: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    output.indent(&suggestion);
                }
            }

            Ok(1)
        }
    }
}
