/*!
 * Unified audio and subtitle timing for an ordered list of scenes.
 *
 * Each scene is laid out on its own local axis (starting at 0) and on the
 * global axis of the concatenated video. When transitions are enabled every
 * scene reserves one transition length of padding on both sides. Narration
 * in the first scene starts after a single transition length, later scenes
 * wait for two (the outgoing padding of the previous scene is not shared).
 */

use std::fmt;

use log::{Level, Log, Record};
use serde::Serialize;

use super::settings::TimingSettings;
use super::validation::{TimingValidationResult, TimingValidator};

const LOG_TARGET: &str = "scenesync::timing";

/// Timing of one scene, both scene-relative and on the global timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneTimingInfo {
    /// Position in playback order
    pub scene_index: usize,
    /// Narration length in seconds
    pub scene_duration: f64,
    /// Scene length including transition padding
    pub extended_duration: f64,

    pub audio_start_time: f64,
    pub audio_end_time: f64,
    pub subtitle_start_time: f64,
    pub subtitle_end_time: f64,

    pub global_video_start: f64,
    pub global_video_end: f64,
    pub global_audio_start: f64,
    pub global_audio_end: f64,
    pub global_subtitle_start: f64,
    pub global_subtitle_end: f64,
}

/// Scene-relative window during which a subtitle is shown
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleWindow {
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
}

impl SceneTimingInfo {
    /// Delay to apply to the scene's narration track when compositing
    pub fn audio_delay(&self) -> f64 {
        self.audio_start_time
    }

    /// Scene-relative subtitle window
    pub fn subtitle_window(&self) -> SubtitleWindow {
        SubtitleWindow {
            start_time: self.subtitle_start_time,
            end_time: self.subtitle_end_time,
            duration: self.subtitle_end_time - self.subtitle_start_time,
        }
    }
}

/// Ordered timings for every scene plus the length of the final video
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingPlan {
    pub timings: Vec<SceneTimingInfo>,
    /// End of the last scene on the global timeline; 0 for an empty plan
    pub total_duration: f64,
}

impl TimingPlan {
    pub fn len(&self) -> usize {
        self.timings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SceneTimingInfo> {
        self.timings.iter()
    }
}

impl<'a> IntoIterator for &'a TimingPlan {
    type Item = &'a SceneTimingInfo;
    type IntoIter = std::slice::Iter<'a, SceneTimingInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.timings.iter()
    }
}

/// Computes timing plans, reporting diagnostics to an injected logger.
///
/// `TimingCalculator::new` uses the process-wide logger installed through
/// the `log` facade; `with_logger` lets callers route diagnostics elsewhere.
pub struct TimingCalculator<'a> {
    settings: TimingSettings,
    logger: &'a dyn Log,
    validator: TimingValidator,
}

impl TimingCalculator<'static> {
    pub fn new(settings: TimingSettings) -> Self {
        Self::with_logger(settings, log::logger())
    }
}

impl<'a> TimingCalculator<'a> {
    pub fn with_logger(settings: TimingSettings, logger: &'a dyn Log) -> Self {
        Self {
            settings,
            logger,
            validator: TimingValidator::new(),
        }
    }

    pub fn settings(&self) -> &TimingSettings {
        &self.settings
    }

    /// Lay out `scene_durations` in order.
    ///
    /// Never fails: an empty slice yields an empty plan. Durations are not
    /// range-checked here; callers reading untrusted input validate first.
    pub fn calculate(&self, scene_durations: &[f64]) -> TimingPlan {
        if scene_durations.is_empty() {
            self.emit(Level::Debug, format_args!("No scenes to time, returning empty plan"));
            return TimingPlan {
                timings: Vec::new(),
                total_duration: 0.0,
            };
        }

        let padding = self.settings.transition_padding();
        let mut timings = Vec::with_capacity(scene_durations.len());
        let mut cursor = 0.0;

        for (index, &duration) in scene_durations.iter().enumerate() {
            let extended_duration = duration + padding * 2.0;

            let audio_start_time = if !self.settings.has_transitions {
                self.settings.subtitle_delay
            } else if index == 0 {
                padding + self.settings.subtitle_delay
            } else {
                padding * 2.0 + self.settings.subtitle_delay
            };
            let audio_end_time = audio_start_time + duration;
            let subtitle_start_time = (audio_start_time - self.settings.subtitle_early_start).max(0.0);
            let subtitle_end_time = audio_end_time;

            let global_video_start = cursor;
            let global_video_end = global_video_start + extended_duration;

            let timing = SceneTimingInfo {
                scene_index: index,
                scene_duration: duration,
                extended_duration,
                audio_start_time,
                audio_end_time,
                subtitle_start_time,
                subtitle_end_time,
                global_video_start,
                global_video_end,
                global_audio_start: global_video_start + audio_start_time,
                global_audio_end: global_video_start + audio_end_time,
                global_subtitle_start: global_video_start + subtitle_start_time,
                global_subtitle_end: global_video_start + subtitle_end_time,
            };

            self.emit(Level::Debug, format_args!("{}", SceneSummary(&timing)));

            timings.push(timing);
            cursor = global_video_end;
        }

        let plan = TimingPlan {
            timings,
            total_duration: cursor,
        };

        self.emit(
            Level::Debug,
            format_args!(
                "Timed {} scenes, total video duration {:.3}s",
                plan.len(),
                plan.total_duration
            ),
        );

        self.validate(scene_durations, &plan);

        plan
    }

    /// Check a plan against its input durations, logging each issue as a warning
    pub fn validate(&self, scene_durations: &[f64], plan: &TimingPlan) -> TimingValidationResult {
        let result = self.validator.validate(scene_durations, &plan.timings);

        for found in &result.issues {
            self.emit(
                Level::Warn,
                format_args!("Scene {}: {}", found.scene_index + 1, found.issue),
            );
        }

        result
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let record = Record::builder()
            .level(level)
            .target(LOG_TARGET)
            .module_path_static(Some(module_path!()))
            .file_static(Some(file!()))
            .args(args)
            .build();

        if self.logger.enabled(record.metadata()) {
            self.logger.log(&record);
        }
    }
}

/// Compute a plan with the process-wide logger
pub fn calculate_timings(scene_durations: &[f64], settings: &TimingSettings) -> TimingPlan {
    TimingCalculator::new(*settings).calculate(scene_durations)
}

struct SceneSummary<'t>(&'t SceneTimingInfo);

impl fmt::Display for SceneSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        write!(
            f,
            "Scene {}: video {:.3}-{:.3}, audio {:.3}-{:.3}, subtitle {:.3}-{:.3}",
            t.scene_index + 1,
            t.global_video_start,
            t.global_video_end,
            t.global_audio_start,
            t.global_audio_end,
            t.global_subtitle_start,
            t.global_subtitle_end
        )
    }
}
