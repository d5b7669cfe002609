use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::{ManifestError, TimingError};
use crate::timing::TimingSettings;

// @module: Scene manifests exported by the video generator

/// File name suffix identifying scene manifests inside a folder
pub const MANIFEST_SUFFIX: &str = ".scenes.json";

/// One narrated scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntry {
    /// Narration length in seconds
    pub duration: f64,

    /// Subtitle text; blank captions produce no subtitle
    #[serde(default)]
    pub caption: String,
}

/// Ordered scenes plus optional per-video timing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    pub scenes: Vec<SceneEntry>,

    /// Overrides the configured timing settings for this video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<TimingSettings>,
}

impl SceneManifest {
    /// Parse and validate manifest JSON
    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        let manifest: SceneManifest =
            serde_json::from_str(content).map_err(|e| ManifestError::Parse(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read and validate a manifest file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        Self::from_json_str(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    /// Require at least one scene, positive finite durations and sane settings
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.scenes.is_empty() {
            return Err(ManifestError::Empty);
        }

        for (index, scene) in self.scenes.iter().enumerate() {
            if !scene.duration.is_finite() || scene.duration <= 0.0 {
                return Err(TimingError::InvalidDuration {
                    index,
                    value: scene.duration,
                }
                .into());
            }
        }

        if let Some(settings) = &self.settings {
            settings.validate()?;
        }

        Ok(())
    }

    pub fn durations(&self) -> Vec<f64> {
        self.scenes.iter().map(|s| s.duration).collect()
    }

    pub fn captions(&self) -> Vec<&str> {
        self.scenes.iter().map(|s| s.caption.as_str()).collect()
    }

    /// Manifest settings when present, otherwise `fallback`
    pub fn effective_settings(&self, fallback: &TimingSettings) -> TimingSettings {
        self.settings.unwrap_or(*fallback)
    }

    /// Whether a path names a scene manifest
    pub fn is_manifest_path(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(strip_manifest_suffix)
            .is_some()
    }

    /// Name stem shared by every output of a manifest (`intro.scenes.json` -> `intro`)
    pub fn output_stem(path: &Path) -> String {
        if let Some(stem) = path.file_name().and_then(|n| n.to_str()).and_then(strip_manifest_suffix) {
            return stem.to_string();
        }

        path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string())
    }
}

fn strip_manifest_suffix(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(MANIFEST_SUFFIX.len())?;
    if split == 0 || !name.is_char_boundary(split) {
        return None;
    }
    let (stem, suffix) = name.split_at(split);
    suffix.eq_ignore_ascii_case(MANIFEST_SUFFIX).then_some(stem)
}
