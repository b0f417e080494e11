//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with the engine defaults applied.
///
/// Later sources replace earlier values key by key; lists are replaced whole.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("engine.allow_extension_scheme", false)?
        .set_default("engine.extra_schemes", Vec::<String>::new())?
        .set_default("engine.trackable_views", vec!["tab_contents"])?
        .set_default("engine.scope.profile", 0)?
        .set_default("engine.scope.off_the_record", false)
}
