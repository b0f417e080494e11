//! navtrack CLI Binary
//!
//! Replays navigation signal scripts and inspects the resulting events and frames.

use clap::Parser;
use navtrack::cli::{exit_code, map_error, Cli, RunContext};
use navtrack::config::ConfigLoader;
use navtrack::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("navtrack CLI starting");

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    // Without --verbose the CLI stays quiet unless a level is requested explicitly,
    // either by flag or through NAVTRACK_LOG.
    if !logging_requested(cli.verbose, cli.log_level.as_deref(), env_filter_set()) {
        return LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        };
    }

    let mut config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
    };

    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }
    config.enabled = true;

    config
}

fn env_filter_set() -> bool {
    std::env::var("NAVTRACK_LOG").is_ok_and(|value| !value.trim().is_empty())
}

fn logging_requested(verbose: bool, log_level: Option<&str>, env_filter: bool) -> bool {
    verbose || log_level.is_some() || env_filter
}
