//! Configuration System
//!
//! Layered configuration for the engine and its logging. Sources are merged by
//! [`ConfigLoader`]: built-in defaults, the global file, workspace files, then
//! `NAVTRACK__SECTION__KEY` environment variables. Tests included.

use crate::error::EngineError;
use crate::logging::LoggingConfig;
use crate::types::{ScopeId, ViewKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavtrackConfig {
    /// Tracking engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Engine eligibility rules and scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Treat `chrome-extension:` URLs as trackable
    #[serde(default)]
    pub allow_extension_scheme: bool,

    /// Additional schemes treated as trackable
    #[serde(default)]
    pub extra_schemes: Vec<String>,

    /// View kinds whose frames may emit events
    #[serde(default = "default_trackable_views")]
    pub trackable_views: Vec<ViewKind>,

    /// Browsing scope this engine serves
    #[serde(default)]
    pub scope: ScopeId,
}

fn default_trackable_views() -> Vec<ViewKind> {
    vec![ViewKind::TabContents]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allow_extension_scheme: false,
            extra_schemes: Vec::new(),
            trackable_views: default_trackable_views(),
            scope: ScopeId::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Engine(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Engine(msg) => write!(f, "Engine: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for scheme in &self.extra_schemes {
            if !is_valid_scheme(scheme) {
                errors.push(format!("Invalid extra scheme '{}'", scheme));
            }
        }

        if self.trackable_views.is_empty() {
            errors.push("trackable_views cannot be empty".to_string());
        }
        for view in &self.trackable_views {
            if view.is_internal() {
                errors.push(format!(
                    "View kind '{}' is internal and can never be tracked",
                    view.as_str()
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl NavtrackConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(engine_errors) = self.engine.validate() {
            errors.extend(engine_errors.into_iter().map(ValidationError::Engine));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Load from `config_file` when given, otherwise from the layered sources of
    /// `workspace_root`, and validate the result.
    pub fn load_validated(
        workspace_root: &Path,
        config_file: Option<&Path>,
    ) -> Result<Self, EngineError> {
        let config = match config_file {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(workspace_root)?,
        };
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            EngineError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        Ok(config)
    }
}

#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
