//! CLI route: single route table and run context. Drives the engine and hands
//! results to presentation.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cli::parse::{Commands, ConfigCommands, OutputFormat};
use crate::cli::presentation::{
    format_config_check, format_events_json, format_events_text, format_frames_json,
    format_frames_text,
};
use crate::config::{EngineConfig, NavtrackConfig};
use crate::dispatch::{EventBus, EventEnvelope, EventIngestor, EventLog};
use crate::engine::NavigationEngine;
use crate::error::EngineError;
use crate::signal::parse_script;
use crate::types::ContainerId;

/// Result of replaying a signal script: the emitted events and the engine in its
/// final state.
pub struct ReplayOutcome {
    pub events: Vec<EventEnvelope>,
    pub engine: NavigationEngine,
}

/// Parse `script` and feed it signal by signal through a fresh engine.
pub fn replay_script(config: &EngineConfig, script: &str) -> Result<ReplayOutcome, EngineError> {
    let signals = parse_script(script)?;
    let (bus, receiver) = EventBus::new_pair();
    let mut ingestor = EventIngestor::new(receiver);
    let log = EventLog::new();
    ingestor.subscribe(log.clone());

    let mut engine = NavigationEngine::new(config, bus);
    let total = signals.len();
    for signal in signals {
        engine.handle(signal);
        ingestor.ingest_pending();
    }
    debug!(signals = total, events = log.len(), "replay finished");

    Ok(ReplayOutcome {
        events: log.events(),
        engine,
    })
}

/// Runtime context for CLI execution: workspace, config source and loaded config.
pub struct RunContext {
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
    config: NavtrackConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, EngineError> {
        let config = NavtrackConfig::load_validated(&workspace_root, config_path.as_deref())?;
        Ok(Self {
            workspace_root,
            config_path,
            config,
        })
    }

    pub fn config(&self) -> &NavtrackConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, EngineError> {
        info!(command = %crate::cli::command_name(command), "executing command");
        match command {
            Commands::Replay { file, format } => {
                let outcome = self.replay_file(file)?;
                match format {
                    OutputFormat::Json => format_events_json(&outcome.events),
                    OutputFormat::Text => Ok(format_events_text(
                        &outcome.events,
                        std::io::stdout().is_terminal(),
                    )),
                }
            }
            Commands::Frames {
                file,
                container,
                format,
            } => {
                let outcome = self.replay_file(file)?;
                self.frames(&outcome.engine, *container, *format)
            }
            Commands::Config { command } => match command {
                ConfigCommands::Check { format, show } => {
                    format_config_check(&self.config, &self.config_source(), *format, *show)
                }
            },
        }
    }

    fn replay_file(&self, file: &Path) -> Result<ReplayOutcome, EngineError> {
        let script = std::fs::read_to_string(file)?;
        replay_script(&self.config.engine, &script)
    }

    fn frames(
        &self,
        engine: &NavigationEngine,
        container: ContainerId,
        format: OutputFormat,
    ) -> Result<String, EngineError> {
        if !engine.registry().contains(container) {
            return Err(EngineError::UnknownContainer(container.to_string()));
        }
        let frames = engine.get_all_frames(container);
        match format {
            OutputFormat::Json => format_frames_json(container, &frames),
            OutputFormat::Text => Ok(format_frames_text(container, &frames)),
        }
    }

    fn config_source(&self) -> String {
        match &self.config_path {
            Some(path) => path.display().to_string(),
            None => format!("layered from {}", self.workspace_root.display()),
        }
    }
}
