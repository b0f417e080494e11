//! Per-workspace engine policy: `config/config.toml`, then the profile overlay
//! `config/{NAVTRACK_ENV}.toml` (profile `development` when unset).
//!
//! Both layers sit above the global file and below `NAVTRACK__*` variables.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_PROFILE: &str = "development";

/// Active profile name from `NAVTRACK_ENV`.
pub fn profile() -> String {
    std::env::var("NAVTRACK_ENV")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}

/// Existing workspace layers, lowest precedence first.
pub fn layer_paths(workspace_root: &Path, profile: &str) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", profile)),
    ]
    .into_iter()
    .filter(|path| path.is_file())
    .collect()
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let profile = profile();
    let layers = layer_paths(workspace_root, &profile);
    debug!(
        workspace = %workspace_root.display(),
        profile = %profile,
        layers = layers.len(),
        "workspace configuration layers"
    );
    Ok(layers.iter().fold(builder, |builder, path| {
        builder.add_source(File::from(path.as_path()).required(false))
    }))
}
