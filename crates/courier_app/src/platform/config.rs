//! Application configuration, read from a RON file.
//!
//! Every field is optional; a missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use courier_core::PollPolicy;
use courier_engine::{BackendSettings, DownloadDefaults, EngineConfig};
use log::LevelFilter;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "courier.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub debounce_ms: u64,
    pub poll_interval_secs: u64,
    pub poll_backoff_secs: u64,
    pub max_poll_attempts: Option<u32>,
    pub max_poll_duration_secs: Option<u64>,
    pub quality: String,
    pub output_dir: String,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            backend_url: engine.backend.base_url,
            connect_timeout_secs: engine.backend.connect_timeout.as_secs(),
            request_timeout_secs: engine.backend.request_timeout.as_secs(),
            debounce_ms: engine.debounce.as_millis() as u64,
            poll_interval_secs: engine.poll.interval.as_secs(),
            poll_backoff_secs: engine.poll.backoff_interval.as_secs(),
            max_poll_attempts: None,
            max_poll_duration_secs: None,
            quality: engine.download.quality,
            output_dir: engine.download.output_dir,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Poll intervals must be non-zero.
    fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be at least 1");
        }
        if self.poll_backoff_secs == 0 {
            bail!("poll_backoff_secs must be at least 1");
        }
        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            backend: BackendSettings {
                base_url: self.backend_url.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
            },
            debounce: Duration::from_millis(self.debounce_ms),
            poll: PollPolicy {
                interval: Duration::from_secs(self.poll_interval_secs),
                backoff_interval: Duration::from_secs(self.poll_backoff_secs),
                max_attempts: self.max_poll_attempts,
                max_duration: self.max_poll_duration_secs.map(Duration::from_secs),
            },
            download: DownloadDefaults {
                quality: self.quality.clone(),
                output_dir: self.output_dir.clone(),
            },
        }
    }
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogDestination {
    /// Write to the configured log file only.
    #[default]
    File,
    /// Write to stderr, interleaved with the rendered view.
    Terminal,
    /// Write to both file and stderr.
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogDestination,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::File,
            level: "info".to_string(),
            file: PathBuf::from("./courier.log"),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| anyhow!("unknown log level {:?}", self.level))
    }
}

pub fn load(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()));
        }
    };

    let config: AppConfig = ron::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.log.level_filter()?;
    config.validate()?;
    Ok(config)
}
