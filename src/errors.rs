/*!
 * Error types for the scenesync application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised when timing inputs are rejected at the edges
#[derive(Error, Debug, PartialEq)]
pub enum TimingError {
    /// A scene duration is zero, negative or not a finite number
    #[error("Invalid duration for scene {index}: {value}")]
    InvalidDuration {
        /// Zero-based scene index
        index: usize,
        /// Offending value in seconds
        value: f64,
    },

    /// A timing setting is negative or not a finite number
    #[error("Invalid timing setting '{name}': {value}")]
    InvalidSetting {
        /// Setting name as it appears in configuration
        name: &'static str,
        /// Offending value in seconds
        value: f64,
    },
}

/// Errors that can occur while building subtitle files
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Captions do not line up with the scenes of the plan
    #[error("Caption count mismatch: {scenes} scenes but {captions} captions")]
    CaptionCountMismatch {
        /// Number of scenes in the timing plan
        scenes: usize,
        /// Number of captions supplied
        captions: usize,
    },

    /// A timestamp could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Errors that can occur while reading a scene manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest contains no scenes
    #[error("Manifest contains no scenes")]
    Empty,

    /// The manifest JSON is malformed
    #[error("Failed to parse manifest: {0}")]
    Parse(String),

    /// A scene or setting in the manifest is out of range
    #[error("Invalid manifest timing: {0}")]
    Timing(#[from] TimingError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from timing validation
    #[error("Timing error: {0}")]
    Timing(#[from] TimingError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from manifest loading
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
