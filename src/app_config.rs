use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::timing::TimingSettings;

/// Application configuration module
/// This module handles loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Timing applied to manifests that carry no settings of their own
    #[serde(default)]
    pub timing: TimingSettings,

    /// Subtitle output settings
    #[serde(default)]
    pub subtitles: SubtitleConfig,

    /// FFmpeg argument settings
    #[serde(default)]
    pub compositing: CompositingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for subtitle output
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleConfig {
    /// Also write one scene-relative SRT per scene clip
    #[serde(default)]
    pub write_scene_files: bool,

    /// Wrap caption lines at this many characters (0 disables wrapping)
    #[serde(default = "default_max_line_chars")]
    pub max_line_chars: usize,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            write_scene_files: false,
            max_line_chars: default_max_line_chars(),
        }
    }
}

/// Configuration for generated FFmpeg arguments
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompositingConfig {
    /// Channel count of the narration audio
    #[serde(default = "default_audio_channels")]
    pub audio_channels: u8,
}

impl Default for CompositingConfig {
    fn default() -> Self {
        Self {
            audio_channels: default_audio_channels(),
        }
    }
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

fn default_max_line_chars() -> usize {
    42 // common broadcast subtitle line length
}

fn default_audio_channels() -> u8 {
    2
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.timing
            .validate()
            .context("Invalid timing settings")?;

        if self.compositing.audio_channels == 0 {
            return Err(anyhow::anyhow!("compositing.audioChannels must be at least 1"));
        }

        Ok(())
    }

    /// Load configuration from `path`, writing a default file when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }
}
