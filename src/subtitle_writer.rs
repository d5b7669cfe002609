use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use crate::timing::{SceneTimingInfo, TimingPlan};

// @module: SRT generation from scene timing plans

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}:\d{2}:\d{2},\d{3}) --> (\d{2,}:\d{2}:\d{2},\d{3})")
        .expect("timestamp pattern is valid")
});

/// Convert seconds to whole milliseconds, rounding to the nearest one.
/// Negative and non-finite values map to zero.
pub fn seconds_to_millis(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0).round() as u64
}

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`)
pub fn seconds_to_srt_time(seconds: f64) -> String {
    SubtitleEntry::format_timestamp(seconds_to_millis(seconds))
}

/// Greedy word wrap; a `max_chars` of 0 disables wrapping.
/// Words longer than the limit get a line of their own.
pub fn wrap_caption(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return text.trim().to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines.join("\n")
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    // @creates: Validated subtitle entry
    // @validates: Time range and non-empty text
    pub fn new_validated(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Result<Self> {
        if end_time_ms <= start_time_ms {
            return Err(anyhow!(
                "Invalid time range: end time {} <= start time {}",
                end_time_ms, start_time_ms
            ));
        }

        let trimmed_text = text.trim();
        if trimmed_text.is_empty() {
            return Err(anyhow!("Empty subtitle text for entry {}", seq_num));
        }

        Ok(SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text: trimmed_text.to_string(),
        })
    }

    /// Parse an SRT timestamp to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());

        let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();
        if parts.len() != 4 {
            return Err(invalid());
        }

        let hours: u64 = parts[0].parse().map_err(|_| invalid())?;
        let minutes: u64 = parts[1].parse().map_err(|_| invalid())?;
        let seconds: u64 = parts[2].parse().map_err(|_| invalid())?;
        let millis: u64 = parts[3].parse().map_err(|_| invalid())?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(invalid());
        }

        hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .ok_or_else(invalid)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Collection of subtitle entries built for one output file
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Manifest or video the subtitles belong to
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Build subtitles for the whole concatenated video.
    ///
    /// `captions` pairs with the plan's scenes by position. Blank captions
    /// produce no entry; sequence numbers stay contiguous.
    pub fn from_plan<S: AsRef<str>>(
        source_file: PathBuf,
        plan: &TimingPlan,
        captions: &[S],
        max_line_chars: usize,
    ) -> Result<Self, SubtitleError> {
        if captions.len() != plan.len() {
            return Err(SubtitleError::CaptionCountMismatch {
                scenes: plan.len(),
                captions: captions.len(),
            });
        }

        let mut collection = Self::new(source_file);
        for (timing, caption) in plan.iter().zip(captions) {
            collection.push_caption(
                caption.as_ref(),
                timing.global_subtitle_start,
                timing.global_subtitle_end,
                timing.scene_index,
                max_line_chars,
            );
        }

        debug!(
            "Built {} subtitle entries from {} scenes",
            collection.entries.len(),
            plan.len()
        );

        Ok(collection)
    }

    /// Build the subtitle for a single scene clip on its local timeline
    pub fn for_scene(source_file: PathBuf, timing: &SceneTimingInfo, caption: &str, max_line_chars: usize) -> Self {
        let mut collection = Self::new(source_file);
        let window = timing.subtitle_window();
        collection.push_caption(
            caption,
            window.start_time,
            window.end_time,
            timing.scene_index,
            max_line_chars,
        );
        collection
    }

    fn push_caption(&mut self, caption: &str, start: f64, end: f64, scene_index: usize, max_line_chars: usize) {
        let text = wrap_caption(caption, max_line_chars);
        let seq_num = self.entries.len() + 1;

        match SubtitleEntry::new_validated(seq_num, seconds_to_millis(start), seconds_to_millis(end), text) {
            Ok(entry) => self.entries.push(entry),
            Err(e) => warn!("Skipping subtitle for scene {}: {}", scene_index + 1, e),
        }
    }

    /// Render the collection in SRT format
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for entry in &self.entries {
            write!(file, "{}", entry)?;
        }

        Ok(())
    }

    /// Parse SRT format string into subtitle entries
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>> {
        let mut entries = Vec::new();

        let mut current_seq_num: Option<usize> = None;
        let mut current_times: Option<(u64, u64)> = None;
        let mut current_text = String::new();
        let mut skipping_block = false;

        let mut flush = |seq_num: usize, (start_ms, end_ms): (u64, u64), text: &str| {
            match SubtitleEntry::new_validated(seq_num, start_ms, end_ms, text.to_string()) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Skipping invalid subtitle entry {}: {}", seq_num, e),
            }
        };

        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                if skipping_block {
                    skipping_block = false;
                    current_seq_num = None;
                } else if let (Some(seq_num), Some(times)) = (current_seq_num, current_times) {
                    if !current_text.is_empty() {
                        flush(seq_num, times, &current_text);
                        current_seq_num = None;
                        current_times = None;
                        current_text.clear();
                    }
                }
                continue;
            }

            if skipping_block {
                continue;
            }

            if current_seq_num.is_none() && current_text.is_empty() {
                if let Ok(num) = trimmed.parse::<usize>() {
                    current_seq_num = Some(num);
                    continue;
                }
            }

            if current_seq_num.is_some() && current_times.is_none() {
                if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                    match (SubtitleEntry::parse_timestamp(&caps[1]), SubtitleEntry::parse_timestamp(&caps[2])) {
                        (Ok(start_ms), Ok(end_ms)) => current_times = Some((start_ms, end_ms)),
                        (Err(e), _) | (_, Err(e)) => {
                            warn!("Skipping subtitle at line {}: {}", line_no + 1, e);
                            skipping_block = true;
                        }
                    }
                    continue;
                }
            }

            if current_seq_num.is_some() && current_times.is_some() {
                if !current_text.is_empty() {
                    current_text.push('\n');
                }
                current_text.push_str(trimmed);
            } else {
                warn!("Unexpected text at line {} before sequence number or timestamp: {}", line_no + 1, trimmed);
            }
        }

        if let (Some(seq_num), Some(times)) = (current_seq_num, current_times) {
            if !current_text.is_empty() {
                flush(seq_num, times, &current_text);
            }
        }

        if entries.is_empty() {
            return Err(anyhow!("No valid subtitle entries were found in the SRT content"));
        }

        entries.sort_by_key(|entry| entry.start_time_ms);
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }

        Ok(entries)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
