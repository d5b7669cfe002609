/*!
 * Consistency checks for computed scene timings.
 *
 * The checks are diagnostic only. They report:
 * - Narration spans that drift from the scene duration
 * - Subtitles that start after their narration
 */

use std::fmt;

use super::calculator::SceneTimingInfo;

/// Allowed drift between a narration span and its scene duration, in seconds
pub const DURATION_TOLERANCE_SECS: f64 = 0.1;

/// Kinds of timing inconsistencies
#[derive(Debug, Clone, PartialEq)]
pub enum TimingIssue {
    /// Narration span does not match the scene duration
    AudioDurationMismatch {
        expected: f64,
        actual: f64,
    },
    /// Subtitle appears after the narration has started
    SubtitleAfterAudio {
        subtitle_start: f64,
        audio_start: f64,
    },
}

impl fmt::Display for TimingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingIssue::AudioDurationMismatch { expected, actual } => {
                write!(
                    f,
                    "Audio duration mismatch: expected {:.3}s, got {:.3}s",
                    expected, actual
                )
            }
            TimingIssue::SubtitleAfterAudio { subtitle_start, audio_start } => {
                write!(
                    f,
                    "Subtitle starts at {:.3}s, after audio at {:.3}s",
                    subtitle_start, audio_start
                )
            }
        }
    }
}

/// An issue tied to the scene it was found in
#[derive(Debug, Clone, PartialEq)]
pub struct SceneIssue {
    pub scene_index: usize,
    pub issue: TimingIssue,
}

/// Outcome of checking a whole plan
#[derive(Debug, Clone, Default)]
pub struct TimingValidationResult {
    /// True when no issue was found
    pub passed: bool,
    /// Issues in scene order
    pub issues: Vec<SceneIssue>,
    /// Number of scenes checked
    pub scenes_checked: usize,
}

impl TimingValidationResult {
    /// Issues found for one scene
    pub fn issues_for_scene(&self, scene_index: usize) -> impl Iterator<Item = &TimingIssue> {
        self.issues
            .iter()
            .filter(move |i| i.scene_index == scene_index)
            .map(|i| &i.issue)
    }
}

/// Checks computed timings against their input durations
#[derive(Debug, Clone)]
pub struct TimingValidator {
    tolerance: f64,
}

impl Default for TimingValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingValidator {
    pub fn new() -> Self {
        Self {
            tolerance: DURATION_TOLERANCE_SECS,
        }
    }

    /// Validator with a custom duration tolerance in seconds
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Check a single scene
    pub fn validate_scene(&self, scene_duration: f64, timing: &SceneTimingInfo) -> Vec<TimingIssue> {
        let mut issues = Vec::new();

        let actual = timing.audio_end_time - timing.audio_start_time;
        if (actual - scene_duration).abs() > self.tolerance {
            issues.push(TimingIssue::AudioDurationMismatch {
                expected: scene_duration,
                actual,
            });
        }

        if timing.subtitle_start_time > timing.audio_start_time {
            issues.push(TimingIssue::SubtitleAfterAudio {
                subtitle_start: timing.subtitle_start_time,
                audio_start: timing.audio_start_time,
            });
        }

        issues
    }

    /// Check every scene; durations and timings are paired by position
    pub fn validate(&self, scene_durations: &[f64], timings: &[SceneTimingInfo]) -> TimingValidationResult {
        let mut issues = Vec::new();

        for (duration, timing) in scene_durations.iter().zip(timings) {
            for issue in self.validate_scene(*duration, timing) {
                issues.push(SceneIssue {
                    scene_index: timing.scene_index,
                    issue,
                });
            }
        }

        TimingValidationResult {
            passed: issues.is_empty(),
            issues,
            scenes_checked: scene_durations.len().min(timings.len()),
        }
    }
}
