use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use serde::Serialize;
use walkdir::WalkDir;

use crate::app_config::Config;
use crate::compositing::{self, SceneAudioArgs};
use crate::manifest::SceneManifest;
use crate::subtitle_writer::SubtitleCollection;
use crate::timing::{TimingCalculator, TimingPlan, TimingSettings};

// @module: Application controller for manifest processing

/// Files written for one manifest
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub subtitle_path: PathBuf,
    pub timings_path: PathBuf,
    pub scene_subtitle_paths: Vec<PathBuf>,
}

/// Counts gathered while processing a folder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Contents of the `<stem>.timings.json` output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimingReport<'a> {
    settings: &'a TimingSettings,
    #[serde(flatten)]
    plan: &'a TimingPlan,
    audio: Vec<SceneAudioArgs>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a controller, rejecting invalid configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Settings that apply to a manifest; its own settings win over the configured ones
    pub fn settings_for(&self, manifest: &SceneManifest) -> TimingSettings {
        if let Some(settings) = &manifest.settings {
            if *settings != self.config.timing {
                debug!("Manifest timing settings override configured timing {:?}", self.config.timing);
            }
        }
        manifest.effective_settings(&self.config.timing)
    }

    /// Compute the timing plan for a manifest
    pub fn plan_for(&self, manifest: &SceneManifest) -> TimingPlan {
        TimingCalculator::new(self.settings_for(manifest)).calculate(&manifest.durations())
    }

    /// Audio arguments for every scene of a manifest
    pub fn audio_args_for(&self, manifest: &SceneManifest) -> Vec<SceneAudioArgs> {
        compositing::audio_filters(&self.plan_for(manifest), &self.config.compositing)
    }

    /// Process one manifest into subtitle and timing files.
    ///
    /// Returns `Ok(None)` when any output already exists and `force_overwrite`
    /// is off. If a write fails, files written by this call are removed again.
    pub async fn run(&self, manifest_path: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<Option<RunOutput>> {
        if !manifest_path.is_file() {
            return Err(anyhow!("Manifest does not exist: {:?}", manifest_path));
        }

        let manifest = SceneManifest::load(&manifest_path).await?;

        let stem = SceneManifest::output_stem(&manifest_path);
        let subtitle_path = output_dir.join(format!("{}.srt", stem));
        let timings_path = output_dir.join(format!("{}.timings.json", stem));
        let scene_subtitle_paths: Vec<PathBuf> = if self.config.subtitles.write_scene_files {
            (1..=manifest.scenes.len())
                .map(|n| output_dir.join(format!("{}.scene{}.srt", stem, n)))
                .collect()
        } else {
            Vec::new()
        };

        if !force_overwrite {
            let existing = [&subtitle_path, &timings_path]
                .into_iter()
                .chain(&scene_subtitle_paths)
                .find(|path| path.exists());
            if let Some(existing) = existing {
                warn!("Output {:?} already exists for {:?}. Use -f to force overwrite.", existing, manifest_path);
                return Ok(None);
            }
        }

        let settings = self.settings_for(&manifest);
        let plan = TimingCalculator::new(settings).calculate(&manifest.durations());

        info!(
            "Timed {} scenes from {:?} ({:.3}s total)",
            plan.len(),
            manifest_path,
            plan.total_duration
        );

        let max_line_chars = self.config.subtitles.max_line_chars;
        let collection = SubtitleCollection::from_plan(
            manifest_path.clone(),
            &plan,
            &manifest.captions(),
            max_line_chars,
        )?;
        debug!("Built {} subtitle entries for {:?}", collection.entries.len(), subtitle_path);

        let mut outputs = vec![(subtitle_path.clone(), collection.to_srt_string())];
        for ((timing, scene), path) in plan.iter().zip(&manifest.scenes).zip(&scene_subtitle_paths) {
            let scene_collection =
                SubtitleCollection::for_scene(manifest_path.clone(), timing, &scene.caption, max_line_chars);
            outputs.push((path.clone(), scene_collection.to_srt_string()));
        }

        let report = TimingReport {
            settings: &settings,
            plan: &plan,
            audio: compositing::audio_filters(&plan, &self.config.compositing),
        };
        let report_json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize timing report")?;
        outputs.push((timings_path.clone(), report_json));

        tokio::fs::create_dir_all(&output_dir)
            .await
            .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;
        write_outputs(&outputs).await?;

        info!("Success: {:?}", subtitle_path);

        Ok(Some(RunOutput {
            subtitle_path,
            timings_path,
            scene_subtitle_paths,
        }))
    }

    /// Process every `*.scenes.json` manifest under `input_dir`.
    ///
    /// Outputs land next to each manifest unless `output_dir` is given, in
    /// which case the manifest's folder below `input_dir` is kept so that
    /// manifests with the same name in different folders do not collide.
    /// A failing manifest is logged and does not stop the walk.
    pub async fn run_folder(&self, input_dir: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<FolderSummary> {
        if !input_dir.is_dir() {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        info!("Processing scene manifests in {:?}", input_dir);

        let mut summary = FolderSummary::default();
        for path in find_manifests(&input_dir) {
            let manifest_dir = path.parent().unwrap_or(Path::new("."));
            let target_dir = match &output_dir {
                Some(out) => out.join(manifest_dir.strip_prefix(&input_dir).unwrap_or(Path::new(""))),
                None => manifest_dir.to_path_buf(),
            };

            match self.run(path.clone(), target_dir, force_overwrite).await {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing {:?}: {:#}", path, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Finished: {} processed, {} skipped, {} failed",
            summary.processed, summary.skipped, summary.failed
        );

        Ok(summary)
    }
}

/// Scene manifests under `dir`, sorted for a stable processing order
fn find_manifests(dir: &Path) -> Vec<PathBuf> {
    let mut manifests: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && SceneManifest::is_manifest_path(p))
        .collect();
    manifests.sort();
    manifests
}

/// Write every output, removing the ones already written if any write fails
async fn write_outputs(outputs: &[(PathBuf, String)]) -> Result<()> {
    for (written, (path, contents)) in outputs.iter().enumerate() {
        if let Err(e) = tokio::fs::write(path, contents).await {
            for (done, _) in &outputs[..written] {
                if let Err(cleanup) = tokio::fs::remove_file(done).await {
                    warn!("Failed to remove partial output {:?}: {}", done, cleanup);
                }
            }
            return Err(e).with_context(|| format!("Failed to write output file: {}", path.display()));
        }
    }
    Ok(())
}
