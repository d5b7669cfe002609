// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use scenesync::app_config::{self, Config};
use scenesync::app_controller::Controller;
use scenesync::manifest::SceneManifest;
use scenesync::subtitle_writer::seconds_to_srt_time;
use scenesync::timing::TimingPlan;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Timing defaults for manifests that carry no settings of their own
#[derive(Args, Debug, Clone, Default)]
struct TimingOverrides {
    /// Pad every scene boundary with a transition
    #[arg(long, conflicts_with = "no_transitions")]
    transitions: bool,

    /// Turn transitions off even when the config enables them
    #[arg(long)]
    no_transitions: bool,

    /// Transition length in seconds
    #[arg(long, value_name = "SECONDS")]
    transition_duration: Option<f64>,

    /// Offset before narration starts in each scene, in seconds
    #[arg(long, value_name = "SECONDS")]
    subtitle_delay: Option<f64>,

    /// How much earlier subtitles appear than narration, in seconds
    #[arg(long, value_name = "SECONDS")]
    subtitle_early_start: Option<f64>,
}

impl TimingOverrides {
    fn apply(&self, config: &mut Config) {
        if self.transitions {
            config.timing.has_transitions = true;
        } else if self.no_transitions {
            config.timing.has_transitions = false;
        }
        if let Some(value) = self.transition_duration {
            config.timing.transition_duration = value;
        }
        if let Some(value) = self.subtitle_delay {
            config.timing.subtitle_delay = value;
        }
        if let Some(value) = self.subtitle_early_start {
            config.timing.subtitle_early_start = value;
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the timing plan of a scene manifest
    Plan {
        /// Scene manifest (*.scenes.json)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        timing: TimingOverrides,
    },

    /// Write SRT and timing files for a manifest or a folder of manifests
    Subtitles {
        /// Scene manifest or directory to process
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Output directory (defaults to next to each manifest)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,

        /// Also write one scene-relative SRT per scene
        #[arg(long)]
        scene_files: bool,

        #[command(flatten)]
        timing: TimingOverrides,
    },

    /// Print per-scene FFmpeg audio arguments
    Filters {
        /// Scene manifest (*.scenes.json)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        #[command(flatten)]
        timing: TimingOverrides,
    },

    /// Generate shell completions for scenesync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// scenesync - scene timing for narrated videos
///
/// Lays out narrated scenes on one video timeline and writes the subtitles
/// and audio offsets the compositing step needs.
#[derive(Parser, Debug)]
#[command(name = "scenesync")]
#[command(version)]
#[command(about = "Scene timing, subtitles and audio offsets for narrated videos")]
#[command(long_about = "scenesync lays out narrated scenes on a single video timeline.

EXAMPLES:
    scenesync plan intro.scenes.json                    # Print the timing table
    scenesync plan --json intro.scenes.json             # Print the plan as JSON
    scenesync subtitles intro.scenes.json               # Write intro.srt and intro.timings.json
    scenesync subtitles -f --scene-files videos/        # Process a folder, one SRT per scene too
    scenesync filters --transitions --transition-duration 0.5 intro.scenes.json
    scenesync completions bash > scenesync.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "scenesync", &mut std::io::stdout());
        }
        Commands::Plan { manifest, json, timing } => {
            let config = load_config(&cli.config_path, cli.log_level, &timing)?;
            let controller = Controller::with_config(config)?;
            let manifest = SceneManifest::load(&manifest).await?;
            let plan = controller.plan_for(&manifest);

            if json {
                println!("{}", serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?);
            } else {
                print_plan_table(&plan);
            }
        }
        Commands::Subtitles { input_path, output_dir, force_overwrite, scene_files, timing } => {
            let mut config = load_config(&cli.config_path, cli.log_level, &timing)?;
            if scene_files {
                config.subtitles.write_scene_files = true;
            }
            let controller = Controller::with_config(config)?;
            run_subtitles(&controller, input_path, output_dir, force_overwrite).await?;
        }
        Commands::Filters { manifest, timing } => {
            let config = load_config(&cli.config_path, cli.log_level, &timing)?;
            let controller = Controller::with_config(config)?;
            let manifest = SceneManifest::load(&manifest).await?;

            for args in controller.audio_args_for(&manifest) {
                println!("scene {}: {}", args.scene_index + 1, args.ffmpeg_args().join(" "));
            }
        }
    }

    Ok(())
}

/// Load the config file and apply the command line on top of it
fn load_config(config_path: &str, log_level: Option<CliLogLevel>, timing: &TimingOverrides) -> Result<Config> {
    if let Some(level) = &log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(config_path)?;
    if let Some(level) = log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    timing.apply(&mut config);
    Ok(config)
}

async fn run_subtitles(controller: &Controller, input_path: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<()> {
    if input_path.is_file() {
        let output_dir = output_dir.unwrap_or_else(|| {
            input_path.parent().unwrap_or(Path::new(".")).to_path_buf()
        });
        controller.run(input_path, output_dir, force_overwrite).await?;
    } else if input_path.is_dir() {
        let summary = controller.run_folder(input_path, output_dir, force_overwrite).await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} manifest(s) failed", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

fn print_plan_table(plan: &TimingPlan) {
    println!(
        "{:>5}  {:<12}  {:<12}  {:<12}  {:<12}  {:>9}",
        "scene", "video start", "audio start", "sub start", "sub end", "delay"
    );
    for t in plan {
        println!(
            "{:>5}  {:<12}  {:<12}  {:<12}  {:<12}  {:>8.3}s",
            t.scene_index + 1,
            seconds_to_srt_time(t.global_video_start),
            seconds_to_srt_time(t.global_audio_start),
            seconds_to_srt_time(t.global_subtitle_start),
            seconds_to_srt_time(t.global_subtitle_end),
            t.audio_delay()
        );
    }
    println!("total: {}", seconds_to_srt_time(plan.total_duration));
}
