//! Integration tests for the CLI route table

use navtrack::cli::{Commands, ConfigCommands, OutputFormat, RunContext};
use navtrack::config::NavtrackConfig;
use navtrack::error::EngineError;
use navtrack::types::ContainerId;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::integration::test_utils::with_xdg_env;

const SCRIPT: &str = r#"# a tab opens a popup from its main frame
{"signal":"container_created","container":"0:1","main_frame":"0:1","process_id":1}
{"signal":"frame_host_created","container":"0:1","frame":"1:1","parent":"0:1","process_id":2}
{"signal":"navigation_started","container":"0:1","frame":"0:1","url":"http://a.com/"}
{"signal":"navigation_started","container":"0:1","frame":"1:1","url":"http://ads.test/"}
{"signal":"navigation_committed","container":"0:1","frame":"0:1","url":"http://a.com/","transition":{"core":"typed","qualifiers":["from_address_bar"]}}
{"signal":"load_failed","container":"0:1","frame":"1:1","url":"http://ads.test/","error":-20}
{"signal":"retargeted","source_container":"0:1","source_frame":"0:1","target_container":"1:1","target_url":"http://b.com/","not_yet_attached":true}
{"signal":"container_added","container":"1:1"}
"#;

fn setup(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let script = temp_dir.path().join("session.jsonl");
    fs::write(&script, SCRIPT).unwrap();

    let mut config = NavtrackConfig::default();
    config.logging.enabled = false;
    let config_path = temp_dir.path().join("navtrack.toml");
    fs::write(&config_path, toml::to_string_pretty(&config).unwrap()).unwrap();
    (script, config_path)
}

fn context(temp_dir: &TempDir, config_path: PathBuf) -> RunContext {
    with_xdg_env(temp_dir, || {
        RunContext::new(temp_dir.path().to_path_buf(), Some(config_path))
    })
    .unwrap()
}

#[test]
fn test_replay_json_lists_sequenced_events() {
    let temp_dir = TempDir::new().unwrap();
    let (script, config_path) = setup(&temp_dir);
    let ctx = context(&temp_dir, config_path);

    let out = ctx
        .execute(&Commands::Replay {
            file: script,
            format: OutputFormat::Json,
        })
        .unwrap();
    let events: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let names: Vec<_> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "onBeforeNavigate",
            "onBeforeNavigate",
            "onCommitted",
            "onErrorOccurred",
            "onCreatedNavigationTarget",
        ]
    );
    assert_eq!(events[0]["seq"], 1);
    assert_eq!(events[2]["transition_qualifiers"][0], "from_address_bar");
    assert_eq!(events[3]["error"], "net::ERR_BLOCKED_BY_CLIENT");
    assert_eq!(events[4]["container"], "1:1");
}

#[test]
fn test_replay_text_is_line_per_event() {
    let temp_dir = TempDir::new().unwrap();
    let (script, config_path) = setup(&temp_dir);
    let ctx = context(&temp_dir, config_path);

    let out = ctx
        .execute(&Commands::Replay {
            file: script,
            format: OutputFormat::Text,
        })
        .unwrap();
    assert_eq!(out.lines().count(), 5);
    assert!(out.lines().nth(2).unwrap().contains("[typed from_address_bar]"));
}

#[test]
fn test_frames_reports_snapshot_and_unknown_containers() {
    let temp_dir = TempDir::new().unwrap();
    let (script, config_path) = setup(&temp_dir);
    let ctx = context(&temp_dir, config_path);

    let out = ctx
        .execute(&Commands::Frames {
            file: script.clone(),
            container: ContainerId::new(0, 1),
            format: OutputFormat::Json,
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["frames"].as_array().unwrap().len(), 2);
    assert_eq!(value["frames"][1]["error_occurred"], true);

    let err = ctx
        .execute(&Commands::Frames {
            file: script,
            container: ContainerId::new(1, 1),
            format: OutputFormat::Text,
        })
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownContainer(_)));
}

#[test]
fn test_config_check_reports_source() {
    let temp_dir = TempDir::new().unwrap();
    let (_, config_path) = setup(&temp_dir);
    let ctx = context(&temp_dir, config_path.clone());

    let out = ctx
        .execute(&Commands::Config {
            command: ConfigCommands::Check {
                format: OutputFormat::Text,
                show: false,
            },
        })
        .unwrap();
    assert!(out.contains(&config_path.display().to_string()));
}

#[test]
fn test_bad_script_reports_line() {
    let temp_dir = TempDir::new().unwrap();
    let (_, config_path) = setup(&temp_dir);
    let ctx = context(&temp_dir, config_path);
    let script = temp_dir.path().join("broken.jsonl");
    fs::write(&script, "{\"signal\":\"container_added\",\"container\":\"0:1\"}\nnot json\n").unwrap();

    let err = ctx
        .execute(&Commands::Replay {
            file: script,
            format: OutputFormat::Json,
        })
        .unwrap_err();
    assert!(matches!(err, EngineError::SignalDecode { line: 2, .. }));
}
