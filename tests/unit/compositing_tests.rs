/*!
 * Tests for FFmpeg audio argument generation
 */

use scenesync::app_config::CompositingConfig;
use scenesync::compositing::{adelay_filter, audio_filters, scene_audio_args};
use scenesync::timing::{calculate_timings, TimingSettings};

#[test]
fn test_adelayFilter_withStereo_shouldDelayBothChannels() {
    let settings = TimingSettings {
        has_transitions: true,
        transition_duration: 1.0,
        subtitle_delay: 0.2,
        ..TimingSettings::default()
    };
    let plan = calculate_timings(&[5.0], &settings);

    assert_eq!(adelay_filter(&plan.timings[0], 2), "adelay=1200|1200");
}

#[test]
fn test_adelayFilter_withZeroChannels_shouldStillEmitOneDelay() {
    let plan = calculate_timings(&[5.0], &TimingSettings::default());
    assert_eq!(adelay_filter(&plan.timings[0], 0), "adelay=0");
}

#[test]
fn test_sceneAudioArgs_shouldPadToExtendedDuration() {
    let plan = calculate_timings(&[4.0, 3.0], &TimingSettings::with_transitions(1.0));
    let args = scene_audio_args(&plan.timings[1], &CompositingConfig { audio_channels: 1 });

    assert_eq!(args.scene_index, 1);
    assert_eq!(args.delay_ms, 2000);
    assert_eq!(args.clip_duration, 5.0);
    assert_eq!(args.filter, "adelay=2000,apad=whole_dur=5.000");
    assert_eq!(args.audio_overrun_ms, None);
    assert_eq!(
        args.ffmpeg_args(),
        vec!["-af", "adelay=2000,apad=whole_dur=5.000", "-t", "5.000"]
    );
}

#[test]
fn test_audioFilters_shouldCoverEveryScene() {
    let plan = calculate_timings(&[1.0, 2.0, 3.0], &TimingSettings::default());
    let all = audio_filters(&plan, &CompositingConfig::default());

    assert_eq!(all.len(), 3);
    let indices: Vec<usize> = all.iter().map(|a| a.scene_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_sceneAudioArgs_withDelayPastClipEnd_shouldRecordOverrun() {
    let settings = TimingSettings {
        subtitle_delay: 0.4,
        ..TimingSettings::default()
    };
    let plan = calculate_timings(&[2.0, 2.0], &settings);
    let all = audio_filters(&plan, &CompositingConfig::default());

    // Clips keep the scene length so the global timeline stays intact
    assert_eq!(plan.total_duration, 4.0);
    for args in &all {
        assert_eq!(args.clip_duration, 2.0);
        assert_eq!(args.filter, "adelay=400|400,apad=whole_dur=2.000");
        assert_eq!(args.audio_overrun_ms, Some(400));
    }
}

#[test]
fn test_sceneAudioArgs_withDelayWithinTransition_shouldNotRecordOverrun() {
    let settings = TimingSettings {
        has_transitions: true,
        transition_duration: 1.0,
        subtitle_delay: 0.5,
        ..TimingSettings::default()
    };
    let plan = calculate_timings(&[3.0, 3.0], &settings);
    let all = audio_filters(&plan, &CompositingConfig::default());

    // First scene: narration ends at 4.5 of 5.0; later scenes start after 2.5
    assert_eq!(all[0].audio_overrun_ms, None);
    assert_eq!(all[1].audio_overrun_ms, Some(500));
}
