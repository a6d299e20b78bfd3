//! Logging initialization for courier_app.
//!
//! Terminal output goes to stderr so it never mixes into the rendered view on
//! stdout.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use super::config::{LogConfig, LogDestination};

/// Initialize the logger from the `log` section of the config.
pub fn initialize(log: &LogConfig) -> anyhow::Result<()> {
    let level = log.level_filter()?;
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(log.destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if matches!(log.destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = create_file_logger(&log.file, level, config) {
            loggers.push(file_logger);
        }
    }

    // A logger installed earlier (tests) wins.
    let _ = CombinedLogger::init(loggers);
    Ok(())
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
