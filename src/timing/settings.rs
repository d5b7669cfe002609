use serde::{Deserialize, Serialize};

use crate::errors::TimingError;

/// Default lead time of a subtitle before its narration, in seconds
pub const DEFAULT_SUBTITLE_EARLY_START: f64 = 0.5;

/// Settings that shape the per-scene timing plan.
///
/// Field names serialize in camelCase so manifests written by the
/// video-generation front end can be read as-is. Missing fields take
/// their defaults at deserialization time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingSettings {
    /// Whether every scene boundary is padded for a crossfade
    #[serde(default)]
    pub has_transitions: bool,

    /// Length of a single transition in seconds
    #[serde(default)]
    pub transition_duration: f64,

    /// Fixed offset before narration audio begins in each scene
    #[serde(default)]
    pub subtitle_delay: f64,

    /// How much earlier a subtitle appears than its narration
    #[serde(default = "default_subtitle_early_start")]
    pub subtitle_early_start: f64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            has_transitions: false,
            transition_duration: 0.0,
            subtitle_delay: 0.0,
            subtitle_early_start: DEFAULT_SUBTITLE_EARLY_START,
        }
    }
}

fn default_subtitle_early_start() -> f64 {
    DEFAULT_SUBTITLE_EARLY_START
}

impl TimingSettings {
    /// Settings with transitions enabled
    pub fn with_transitions(transition_duration: f64) -> Self {
        Self {
            has_transitions: true,
            transition_duration,
            ..Self::default()
        }
    }

    /// Padding added on each side of a scene; zero when transitions are off
    pub fn transition_padding(&self) -> f64 {
        if self.has_transitions {
            self.transition_duration
        } else {
            0.0
        }
    }

    /// Reject negative or non-finite values
    pub fn validate(&self) -> Result<(), TimingError> {
        let fields = [
            ("transitionDuration", self.transition_duration),
            ("subtitleDelay", self.subtitle_delay),
            ("subtitleEarlyStart", self.subtitle_early_start),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(TimingError::InvalidSetting { name, value });
            }
        }

        Ok(())
    }
}
