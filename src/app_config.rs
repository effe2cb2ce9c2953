use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::CleanError;
use crate::run_collapser::{DEFAULT_COLLAPSE_THRESHOLD, UnpairedPolicy};
use crate::word_count::WordCountLanguage;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Shortest run of identical cues that gets reduced to its first cue
    #[serde(default = "default_collapse_threshold")]
    pub collapse_threshold: usize,

    /// Whether runs of blank lines are squeezed to one after collapsing
    #[serde(default = "default_true")]
    pub normalize_spacing: bool,

    /// Handling of timing lines not followed by a speaker-tagged line
    #[serde(default)]
    pub unpaired_policy: UnpairedPolicy,

    /// Suffix for outputs written in folder mode (`<stem>.<suffix>.vtt`)
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Language rules used by the word counter
    #[serde(default)]
    pub word_count_language: WordCountLanguage,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_collapse_threshold() -> usize {
    DEFAULT_COLLAPSE_THRESHOLD
}

fn default_true() -> bool {
    true
}

fn default_output_suffix() -> String {
    "cleaned".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), CleanError> {
        if self.collapse_threshold < 2 {
            return Err(CleanError::InvalidConfig(format!(
                "collapse_threshold must be at least 2, got {}",
                self.collapse_threshold
            )));
        }

        let suffix = self.output_suffix.trim();
        if suffix.is_empty() {
            return Err(CleanError::InvalidConfig("output_suffix must not be empty".to_string()));
        }
        if suffix.contains(['/', '\\']) {
            return Err(CleanError::InvalidConfig(format!(
                "output_suffix must not contain path separators: {}",
                suffix
            )));
        }

        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            collapse_threshold: default_collapse_threshold(),
            normalize_spacing: default_true(),
            unpaired_policy: UnpairedPolicy::default(),
            output_suffix: default_output_suffix(),
            word_count_language: WordCountLanguage::default(),
            log_level: LogLevel::default(),
        }
    }
}
