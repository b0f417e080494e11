//! CLI output: error mapping from engine errors to stable CLI surface.

use crate::error::EngineError;

/// Map engine errors to a string for CLI output.
pub fn map_error(e: &EngineError) -> String {
    match e {
        EngineError::SignalDecode { .. } => format!(
            "error: {}\nhint: signal scripts hold one JSON object per line with a \"signal\" tag",
            e
        ),
        EngineError::UnknownContainer(_) => format!(
            "error: {}\nhint: the container was never created or was destroyed by the script",
            e
        ),
        _ => format!("error: {}", e),
    }
}

/// Process exit code per error category.
pub fn exit_code(e: &EngineError) -> i32 {
    match e {
        EngineError::ConfigError(_) => 2,
        EngineError::SignalDecode { .. } | EngineError::InvalidHandle(_) => 3,
        EngineError::UnknownContainer(_) => 4,
        _ => 1,
    }
}
