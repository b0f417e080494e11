//! CLI presentation: text and json formatters per command family.

mod config;
mod events;
mod frames;

pub use config::format_config_check;
pub use events::{format_events_json, format_events_text};
pub use frames::{format_frames_json, format_frames_text};
