//! Integration tests for the configuration system

use crate::integration::test_utils::*;
use navtrack::config::{ConfigLoader, NavtrackConfig};
use navtrack::types::ViewKind;
use tempfile::TempDir;

#[test]
fn test_config_file_drives_engine_policy() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("navtrack.toml");
    std::fs::write(
        &config_file,
        r#"
[engine]
extra_schemes = ["ipfs"]
trackable_views = ["tab_contents", "panel"]
"#,
    )
    .unwrap();

    let config = with_xdg_env(&temp_dir, || ConfigLoader::load_from_file(&config_file)).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(
        config.engine.trackable_views,
        vec![ViewKind::TabContents, ViewKind::Panel]
    );

    let mut harness = Harness::with_config(&config.engine);
    harness.open(TAB, MAIN);
    harness.apply(started(TAB, MAIN, "ipfs://bafy/"));
    assert_eq!(harness.take_names(), vec!["onBeforeNavigate"]);
}

#[test]
fn test_xdg_config_home_is_the_global_source() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("workspace");
    std::fs::create_dir_all(&workspace).unwrap();

    let config = with_xdg_env(&temp_dir, || {
        let global_dir = temp_dir.path().join("xdg").join("navtrack");
        std::fs::create_dir_all(&global_dir).unwrap();
        std::fs::write(
            global_dir.join("config.toml"),
            "[engine]\nallow_extension_scheme = true\n",
        )
        .unwrap();
        assert_eq!(
            ConfigLoader::xdg_config_path(),
            Some(global_dir.join("config.toml"))
        );
        ConfigLoader::load(&workspace)
    })
    .unwrap();
    assert!(config.engine.allow_extension_scheme);
}

#[test]
fn test_environment_specific_workspace_file_wins() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("workspace");
    let config_dir = workspace.join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[logging]\nlevel = \"warn\"\n",
    )
    .unwrap();
    std::fs::write(
        config_dir.join("development.toml"),
        "[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();

    let config = with_xdg_env(&temp_dir, || {
        std::env::remove_var("NAVTRACK_ENV");
        ConfigLoader::load(&workspace)
    })
    .unwrap();
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_invalid_config_is_rejected_with_every_problem() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    std::fs::write(
        &config_file,
        r#"
[engine]
extra_schemes = ["not a scheme"]
trackable_views = ["extension_guest"]

[logging]
format = "xml"
"#,
    )
    .unwrap();

    let config = with_xdg_env(&temp_dir, || ConfigLoader::load_from_file(&config_file)).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 3);

    let err = with_xdg_env(&temp_dir, || {
        NavtrackConfig::load_validated(temp_dir.path(), Some(&config_file))
    })
    .unwrap_err();
    assert!(err.to_string().contains("Configuration validation failed"));
}
