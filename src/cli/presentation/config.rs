//! Formatter for `config check`.

use crate::cli::parse::OutputFormat;
use crate::config::NavtrackConfig;
use crate::error::EngineError;

pub fn format_config_check(
    config: &NavtrackConfig,
    source: &str,
    format: OutputFormat,
    show: bool,
) -> Result<String, EngineError> {
    if format == OutputFormat::Json {
        let out = serde_json::json!({
            "valid": true,
            "source": source,
            "config": config,
        });
        return Ok(serde_json::to_string_pretty(&out)?);
    }

    let engine = &config.engine;
    let views: Vec<&str> = engine.trackable_views.iter().map(|v| v.as_str()).collect();
    let schemes = if engine.extra_schemes.is_empty() {
        "-".to_string()
    } else {
        engine.extra_schemes.join(", ")
    };
    let mut out = format!(
        "Configuration valid ({})\n  Scope: profile {}{}\n  Extension scheme: {}\n  Extra schemes: {}\n  Trackable views: {}\n  Logging: {} {} -> {}",
        source,
        engine.scope.profile,
        if engine.scope.off_the_record { " (off the record)" } else { "" },
        if engine.allow_extension_scheme { "allowed" } else { "rejected" },
        schemes,
        views.join(", "),
        config.logging.level,
        config.logging.format,
        config.logging.output,
    );
    if show {
        let effective = toml::to_string_pretty(config)
            .map_err(|e| EngineError::ConfigError(format!("Failed to render config: {}", e)))?;
        out.push_str("\n\n# Effective configuration\n");
        out.push_str(&effective);
    }
    Ok(out)
}
