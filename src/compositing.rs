/*!
 * FFmpeg arguments derived from a timing plan.
 *
 * Each scene clip is rendered with its narration delayed by the scene's
 * audio start offset and padded with silence up to the extended scene
 * length. Clips are never stretched past that length: the global timeline
 * and the subtitles depend on it. Narration that would run past the clip
 * end is cut by `-t`, and the overrun is logged and recorded per scene.
 */

use log::warn;
use serde::Serialize;

use crate::app_config::CompositingConfig;
use crate::subtitle_writer::seconds_to_millis;
use crate::timing::{SceneTimingInfo, TimingPlan};

/// Audio arguments for one scene clip
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneAudioArgs {
    pub scene_index: usize,
    /// Narration delay in milliseconds
    pub delay_ms: u64,
    /// Clip length in seconds, transition padding included
    pub clip_duration: f64,
    /// Audio filter chain for `-af`
    pub filter: String,
    /// Milliseconds of narration past the clip end, cut when rendering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_overrun_ms: Option<u64>,
}

impl SceneAudioArgs {
    /// Full argument list for the audio side of a clip render
    pub fn ffmpeg_args(&self) -> Vec<String> {
        vec![
            "-af".to_string(),
            self.filter.clone(),
            "-t".to_string(),
            format_time(self.clip_duration),
        ]
    }
}

/// `adelay` filter delaying every channel by the scene's audio offset
pub fn adelay_filter(timing: &SceneTimingInfo, channels: u8) -> String {
    let delay_ms = seconds_to_millis(timing.audio_delay());
    let per_channel = (0..channels.max(1))
        .map(|_| delay_ms.to_string())
        .collect::<Vec<_>>()
        .join("|");
    format!("adelay={}", per_channel)
}

/// Audio arguments for a single scene
pub fn scene_audio_args(timing: &SceneTimingInfo, config: &CompositingConfig) -> SceneAudioArgs {
    let filter = format!(
        "{},apad=whole_dur={}",
        adelay_filter(timing, config.audio_channels),
        format_time(timing.extended_duration)
    );

    let clip_ms = seconds_to_millis(timing.extended_duration);
    let audio_end_ms = seconds_to_millis(timing.audio_end_time);
    let audio_overrun_ms = (audio_end_ms > clip_ms).then(|| audio_end_ms - clip_ms);
    if let Some(overrun) = audio_overrun_ms {
        warn!(
            "Scene {}: narration ends {}ms after the {} clip end and will be cut",
            timing.scene_index + 1,
            overrun,
            format_time(timing.extended_duration)
        );
    }

    SceneAudioArgs {
        scene_index: timing.scene_index,
        delay_ms: seconds_to_millis(timing.audio_delay()),
        clip_duration: timing.extended_duration,
        filter,
        audio_overrun_ms,
    }
}

/// Audio arguments for every scene in the plan, in order
pub fn audio_filters(plan: &TimingPlan, config: &CompositingConfig) -> Vec<SceneAudioArgs> {
    plan.iter().map(|timing| scene_audio_args(timing, config)).collect()
}

fn format_time(seconds: f64) -> String {
    format!("{:.3}", seconds)
}
