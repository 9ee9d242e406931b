use crate::domain::Mode;
use crate::persistence::{read_json, StoreError};
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_WORK_SECS: u64 = 20 * 60;
pub const DEFAULT_SHORT_BREAK_SECS: u64 = 5 * 60;
pub const DEFAULT_LONG_BREAK_SECS: u64 = 15 * 60;
pub const DEFAULT_WORK_SESSIONS_PER_LONG_BREAK: u32 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} duration must be at least one second")]
    NonPositiveDuration(&'static str),
    #[error("WorkSessionsPerLongBreak must be at least 1")]
    ZeroThreshold,
}

/// Countdown length for each mode, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub work: u64,
    pub short_break: u64,
    pub long_break: u64,
}

impl Durations {
    pub fn get(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Work => self.work,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }
}

/// Validated timer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub durations: Durations,
    pub work_sessions_per_long_break: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            durations: Durations {
                work: DEFAULT_WORK_SECS,
                short_break: DEFAULT_SHORT_BREAK_SECS,
                long_break: DEFAULT_LONG_BREAK_SECS,
            },
            work_sessions_per_long_break: DEFAULT_WORK_SESSIONS_PER_LONG_BREAK,
        }
    }
}

/// config.json contents. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigFile {
    #[serde(default = "default_work")]
    pub work: u64,
    #[serde(default = "default_short_break")]
    pub short_break: u64,
    #[serde(default = "default_long_break")]
    pub long_break: u64,
    #[serde(default = "default_threshold")]
    pub work_sessions_per_long_break: u32,
}

fn default_work() -> u64 {
    DEFAULT_WORK_SECS
}

fn default_short_break() -> u64 {
    DEFAULT_SHORT_BREAK_SECS
}

fn default_long_break() -> u64 {
    DEFAULT_LONG_BREAK_SECS
}

fn default_threshold() -> u32 {
    DEFAULT_WORK_SESSIONS_PER_LONG_BREAK
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            work: DEFAULT_WORK_SECS,
            short_break: DEFAULT_SHORT_BREAK_SECS,
            long_break: DEFAULT_LONG_BREAK_SECS,
            work_sessions_per_long_break: DEFAULT_WORK_SESSIONS_PER_LONG_BREAK,
        }
    }
}

/// Command-line overrides, applied on top of the file
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub work: Option<u64>,
    pub short_break: Option<u64>,
    pub long_break: Option<u64>,
    pub work_sessions_per_long_break: Option<u32>,
}

impl ConfigFile {
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(v) = overrides.work {
            self.work = v;
        }
        if let Some(v) = overrides.short_break {
            self.short_break = v;
        }
        if let Some(v) = overrides.long_break {
            self.long_break = v;
        }
        if let Some(v) = overrides.work_sessions_per_long_break {
            self.work_sessions_per_long_break = v;
        }
        self
    }

    pub fn validate(&self) -> Result<TimerConfig, ConfigError> {
        for (name, secs) in [
            ("Work", self.work),
            ("ShortBreak", self.short_break),
            ("LongBreak", self.long_break),
        ] {
            if secs == 0 {
                return Err(ConfigError::NonPositiveDuration(name));
            }
        }
        if self.work_sessions_per_long_break == 0 {
            return Err(ConfigError::ZeroThreshold);
        }

        Ok(TimerConfig {
            durations: Durations {
                work: self.work,
                short_break: self.short_break,
                long_break: self.long_break,
            },
            work_sessions_per_long_break: self.work_sessions_per_long_break,
        })
    }
}

/// Read config.json; a corrupt file falls back to defaults
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    match read_json::<ConfigFile>(path) {
        Ok(file) => Ok(file.unwrap_or_default()),
        Err(StoreError::Corrupt { path, source }) => {
            warn!(path = %path.display(), error = %source, "config file is corrupt, using defaults");
            Ok(ConfigFile::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Load, override and validate. Invalid values fall back to the defaults.
pub fn load_timer_config(path: &Path, overrides: Overrides) -> Result<TimerConfig> {
    let file = load_config_file(path)?.apply(overrides);
    match file.validate() {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!(error = %e, "invalid timer configuration, using defaults");
            Ok(TimerConfig::default())
        }
    }
}
