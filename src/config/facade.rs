//! Config loading facade: assembles sources in precedence order.

use config::{Environment, File};
use std::path::{Path, PathBuf};

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::NavtrackConfig;
use crate::error::EngineError;

/// Loads [`NavtrackConfig`] from defaults, config files and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `workspace_root`.
    ///
    /// Precedence (highest last): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{NAVTRACK_ENV}.toml`,
    /// `NAVTRACK__SECTION__KEY` environment variables.
    pub fn load(workspace_root: &Path) -> Result<NavtrackConfig, EngineError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder.add_source(environment()).build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load configuration from a single explicit file, still honoring
    /// environment overrides.
    pub fn load_from_file(path: &Path) -> Result<NavtrackConfig, EngineError> {
        if !path.exists() {
            return Err(EngineError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(environment())
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Built-in defaults only.
    pub fn default() -> NavtrackConfig {
        NavtrackConfig::default()
    }

    /// Location of the global config file, if a home directory is known.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("NAVTRACK")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("engine.extra_schemes")
        .with_list_parse_key("engine.trackable_views")
        .try_parsing(true)
}
