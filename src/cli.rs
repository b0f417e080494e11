//! CLI domain: parse, route, help, output, and presentation only.
//! No engine logic; the route table drives the engine and hands results to presentation.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands, ConfigCommands, OutputFormat};
pub use presentation::{
    format_config_check, format_events_json, format_events_text, format_frames_json,
    format_frames_text,
};
pub use route::{replay_script, ReplayOutcome, RunContext};
