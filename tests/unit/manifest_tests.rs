/*!
 * Tests for scene manifest parsing and validation
 */

use std::path::Path;

use scenesync::errors::{ManifestError, TimingError};
use scenesync::manifest::SceneManifest;
use scenesync::timing::TimingSettings;
use crate::common;

#[test]
fn test_fromJsonStr_withSampleManifest_shouldReadScenesInOrder() {
    let manifest = SceneManifest::from_json_str(common::SAMPLE_MANIFEST).unwrap();

    assert_eq!(manifest.durations(), vec![4.0, 3.0, 2.5]);
    assert_eq!(manifest.captions()[1], "Magma rises through cracks in the crust.");
    assert!(manifest.settings.is_none());
}

#[test]
fn test_fromJsonStr_withSettings_shouldOverrideFallback() {
    let manifest = SceneManifest::from_json_str(common::TRANSITION_MANIFEST).unwrap();
    let settings = manifest.effective_settings(&TimingSettings::default());

    assert!(settings.has_transitions);
    assert_eq!(settings.transition_duration, 1.0);
    assert_eq!(settings.subtitle_early_start, 0.5);
}

#[test]
fn test_fromJsonStr_withMissingCaption_shouldDefaultToEmpty() {
    let manifest = SceneManifest::from_json_str(r#"{"scenes": [{"duration": 1.5}]}"#).unwrap();
    assert_eq!(manifest.captions(), vec![""]);
}

#[test]
fn test_fromJsonStr_withNoScenes_shouldFail() {
    let err = SceneManifest::from_json_str(r#"{"scenes": []}"#).unwrap_err();
    assert!(matches!(err, ManifestError::Empty));
}

#[test]
fn test_fromJsonStr_withZeroDuration_shouldReportSceneIndex() {
    let err = SceneManifest::from_json_str(r#"{"scenes": [{"duration": 2}, {"duration": 0}]}"#).unwrap_err();

    assert!(matches!(
        err,
        ManifestError::Timing(TimingError::InvalidDuration { index: 1, .. })
    ));
}

#[test]
fn test_fromJsonStr_withNegativeSetting_shouldFail() {
    let json = r#"{"scenes": [{"duration": 2}], "settings": {"transitionDuration": -1}}"#;
    let err = SceneManifest::from_json_str(json).unwrap_err();

    assert!(matches!(
        err,
        ManifestError::Timing(TimingError::InvalidSetting { name: "transitionDuration", .. })
    ));
}

#[test]
fn test_fromJsonStr_withMalformedJson_shouldReturnParseError() {
    let err = SceneManifest::from_json_str("{ scenes: ").unwrap_err();
    assert!(matches!(err, ManifestError::Parse(_)));
}

#[test]
fn test_isManifestPath_shouldMatchSuffixCaseInsensitively() {
    assert!(SceneManifest::is_manifest_path(Path::new("videos/intro.scenes.json")));
    assert!(SceneManifest::is_manifest_path(Path::new("INTRO.SCENES.JSON")));
    assert!(!SceneManifest::is_manifest_path(Path::new("intro.json")));
    assert!(!SceneManifest::is_manifest_path(Path::new(".scenes.json")));
}

#[test]
fn test_outputStem_shouldStripManifestSuffix() {
    assert_eq!(SceneManifest::output_stem(Path::new("a/intro.scenes.json")), "intro");
    assert_eq!(SceneManifest::output_stem(Path::new("a/plain.json")), "plain");
}

#[tokio::test]
async fn test_load_withMissingFile_shouldFailWithPath() {
    let err = SceneManifest::load("does/not/exist.scenes.json").await.unwrap_err();
    assert!(format!("{:#}", err).contains("does/not/exist.scenes.json"));
}
