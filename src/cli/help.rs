//! CLI command-name contract for logging.

use crate::cli::parse::{Commands, ConfigCommands};

/// Command name string for log fields (e.g. "replay", "config.check").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Replay { .. } => "replay".to_string(),
        Commands::Frames { .. } => "frames".to_string(),
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
    }
}

pub fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::Check { .. } => "check",
    }
}
