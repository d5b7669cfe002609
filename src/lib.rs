/*!
 * # scenesync - scene timing for narrated videos
 *
 * A Rust library that lays out ordered, narrated scenes on a single video
 * timeline and produces what the compositing step needs from that layout.
 *
 * ## Features
 *
 * - Per-scene audio and subtitle offsets, scene-relative and global
 * - Optional transition padding around every scene
 * - Subtitle lead time ahead of narration
 * - SRT output for the full video or for each scene clip
 * - FFmpeg audio delay and padding filters per scene
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timing`: Timing settings, the calculator and its consistency checks
 * - `subtitle_writer`: SRT timestamps and subtitle file generation
 * - `compositing`: FFmpeg audio arguments derived from a plan
 * - `manifest`: Scene manifests exported by the video generator
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod compositing;
pub mod errors;
pub mod manifest;
pub mod subtitle_writer;
pub mod timing;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ManifestError, SubtitleError, TimingError};
pub use manifest::{SceneEntry, SceneManifest};
pub use subtitle_writer::{seconds_to_srt_time, SubtitleCollection, SubtitleEntry};
pub use timing::{calculate_timings, SceneTimingInfo, TimingCalculator, TimingPlan, TimingSettings};
