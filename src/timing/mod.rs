/*!
 * Scene timing: settings, the calculator and its consistency checks.
 */

pub mod calculator;
pub mod settings;
pub mod validation;

pub use calculator::{calculate_timings, SceneTimingInfo, SubtitleWindow, TimingCalculator, TimingPlan};
pub use settings::{TimingSettings, DEFAULT_SUBTITLE_EARLY_START};
pub use validation::{SceneIssue, TimingIssue, TimingValidationResult, TimingValidator, DURATION_TOLERANCE_SECS};
