//! Error types for the navigation tracking engine.
//!
//! Signal handling itself never fails: stale or unattributable signals are dropped
//! and logged. These errors cover the outer layers (configuration, logging, signal
//! scripts and event sinks).

use thiserror::Error;

/// Failure to parse a `slot:generation` handle string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid handle '{0}' (expected <slot>:<generation>)")]
pub struct HandleParseError(pub String);

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid signal on line {line}: {message}")]
    SignalDecode { line: usize, message: String },

    #[error("Event sink failed: {0}")]
    SinkFailed(String),

    #[error("Unknown container: {0}")]
    UnknownContainer(String),

    #[error("Invalid handle: {0}")]
    InvalidHandle(#[from] HandleParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::ConfigError(err.to_string())
    }
}
