/*!
 * Tests for the scene timing calculator
 */

use scenesync::timing::{calculate_timings, TimingCalculator, TimingSettings};

const EPSILON: f64 = 1e-9;

fn settings(has_transitions: bool, transition_duration: f64, subtitle_delay: f64, subtitle_early_start: f64) -> TimingSettings {
    TimingSettings {
        has_transitions,
        transition_duration,
        subtitle_delay,
        subtitle_early_start,
    }
}

/// Deterministic spread of scene lengths between 0.1s and ~20s
fn scene_lengths(count: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            0.1 + (state >> 33) as f64 / (1u64 << 31) as f64 * 20.0
        })
        .collect()
}

#[test]
fn test_calculate_withSingleSceneNoTransitions_shouldMatchScenario() {
    let plan = calculate_timings(&[5.0], &settings(false, 0.0, 0.0, 0.5));

    assert_eq!(plan.len(), 1);
    let t = &plan.timings[0];
    assert_eq!(t.audio_start_time, 0.0);
    assert_eq!(t.audio_end_time, 5.0);
    assert_eq!(t.subtitle_start_time, 0.0);
    assert_eq!(t.subtitle_end_time, 5.0);
    assert_eq!(t.global_video_start, 0.0);
    assert_eq!(t.global_video_end, 5.0);
}

#[test]
fn test_calculate_withSingleSceneTransitionsAndDelay_shouldMatchScenario() {
    let plan = calculate_timings(&[5.0], &settings(true, 1.0, 0.2, 0.5));

    let t = &plan.timings[0];
    assert!((t.audio_start_time - 1.2).abs() < EPSILON);
    assert!((t.audio_end_time - 6.2).abs() < EPSILON);
    assert!((t.subtitle_start_time - 0.7).abs() < EPSILON);
    assert!((t.extended_duration - 7.0).abs() < EPSILON);
    assert!((t.global_video_end - 7.0).abs() < EPSILON);
    assert!((plan.total_duration - 7.0).abs() < EPSILON);
}

#[test]
fn test_calculate_withTwoScenesTransitions_shouldKeepFirstSceneAsymmetry() {
    let plan = calculate_timings(&[4.0, 3.0], &settings(true, 1.0, 0.0, 0.5));

    assert_eq!(plan.timings[0].audio_start_time, 1.0);
    assert_eq!(plan.timings[1].audio_start_time, 2.0);
    assert_eq!(plan.timings[0].extended_duration, 6.0);
    assert_eq!(plan.timings[1].global_video_start, 6.0);
}

#[test]
fn test_calculate_withEmptyInput_shouldReturnEmptyPlanWithoutError() {
    let plan = calculate_timings(&[], &TimingSettings::default());

    assert!(plan.is_empty());
    assert_eq!(plan.total_duration, 0.0);
}

#[test]
fn test_calculate_withSubtitleDelayNoTransitions_shouldOffsetEveryScene() {
    let plan = calculate_timings(&[2.0, 2.0, 2.0], &settings(false, 3.0, 0.4, 0.25));

    for t in &plan {
        assert!((t.audio_start_time - 0.4).abs() < EPSILON);
        assert!((t.subtitle_start_time - 0.15).abs() < EPSILON);
        assert_eq!(t.extended_duration, 2.0);
    }
    assert!((plan.total_duration - 6.0).abs() < EPSILON);
}

#[test]
fn test_calculate_withLargeEarlyStart_shouldClampSubtitleToSceneStart() {
    let plan = calculate_timings(&[3.0, 3.0], &settings(true, 0.5, 0.0, 5.0));

    for t in &plan {
        assert_eq!(t.subtitle_start_time, 0.0);
        assert_eq!(t.global_subtitle_start, t.global_video_start);
    }
}

#[test]
fn test_calculate_withGeneratedInputs_shouldHoldTimingInvariants() {
    let configurations = [
        settings(false, 0.0, 0.0, 0.5),
        settings(true, 1.0, 0.2, 0.5),
        settings(true, 0.35, 0.0, 0.0),
        settings(false, 2.0, 1.5, 3.0),
        settings(true, 2.5, 0.75, 10.0),
    ];

    for (seed, settings) in configurations.iter().enumerate() {
        for count in [1, 2, 7, 40] {
            let durations = scene_lengths(count, seed as u64 + 1);
            let plan = calculate_timings(&durations, settings);

            assert_eq!(plan.len(), durations.len());

            for (t, d) in plan.iter().zip(&durations) {
                assert!((t.audio_end_time - t.audio_start_time - d).abs() < EPSILON);
                assert!(t.subtitle_start_time <= t.audio_start_time);
                assert_eq!(t.subtitle_end_time, t.audio_end_time);
                assert!(t.global_video_start <= t.global_audio_start);
                assert!(t.global_video_end >= t.global_video_start);
            }

            for pair in plan.timings.windows(2) {
                assert_eq!(pair[1].global_video_start, pair[0].global_video_end);
            }

            assert_eq!(plan.total_duration, plan.timings.last().unwrap().global_video_end);
        }
    }
}

#[test]
fn test_calculate_calledTwice_shouldBeBitIdentical() {
    let durations = scene_lengths(12, 99);
    let calculator = TimingCalculator::new(settings(true, 0.8, 0.1, 0.5));

    let first = calculator.calculate(&durations);
    let second = calculator.calculate(&durations);

    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.global_audio_start.to_bits(), b.global_audio_start.to_bits());
        assert_eq!(a.global_subtitle_end.to_bits(), b.global_subtitle_end.to_bits());
    }
    assert_eq!(first, second);
}

#[test]
fn test_calculate_fromSeveralThreads_shouldAgree() {
    let durations = scene_lengths(25, 7);
    let expected = calculate_timings(&durations, &TimingSettings::with_transitions(0.5));

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| calculate_timings(&durations, &TimingSettings::with_transitions(0.5))))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_plan_json_shouldUseCamelCaseFields() {
    let plan = calculate_timings(&[1.0], &TimingSettings::default());
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["totalDuration"], 1.0);
    assert_eq!(json["timings"][0]["globalVideoEnd"], 1.0);
    assert_eq!(json["timings"][0]["audioStartTime"], 0.0);
}
