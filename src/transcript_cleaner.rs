/*!
 * End-to-end cleaning of one transcript.
 *
 * Lines are split with their terminators kept, run through the cue
 * classifier and repeat collapser in a single pass, then through the
 * blank-line normalizer, and written back verbatim.
 */

use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::app_config::Config;
use crate::errors::CleanError;
use crate::file_utils::FileManager;
use crate::run_collapser::{collapse_duplicates, CollapseStats, UnpairedPolicy, DEFAULT_COLLAPSE_THRESHOLD};
use crate::spacing::normalize_spacing;

/// Knobs of a cleaning pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    pub collapse_threshold: usize,
    pub unpaired_policy: UnpairedPolicy,
    pub normalize_spacing: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            collapse_threshold: DEFAULT_COLLAPSE_THRESHOLD,
            unpaired_policy: UnpairedPolicy::default(),
            normalize_spacing: true,
        }
    }
}

impl From<&Config> for CleanOptions {
    fn from(config: &Config) -> Self {
        Self {
            collapse_threshold: config.collapse_threshold,
            unpaired_policy: config.unpaired_policy,
            normalize_spacing: config.normalize_spacing,
        }
    }
}

/// Outcome of cleaning one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub input_lines: usize,
    pub output_lines: usize,
    pub stats: CollapseStats,
}

/// Split text into lines, each keeping its `\n` terminator.
///
/// `\r\n` and a lone `\r` are both read as `\n`; the last line has no terminator when the text
/// does not end with one.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .split_inclusive('\n')
        .map(str::to_string)
        .collect()
}

/// Run the collapse pass and, if enabled, the spacing pass over `lines`
pub fn clean_lines<S: AsRef<str>>(lines: &[S], options: &CleanOptions) -> (Vec<String>, CollapseStats) {
    let (collapsed, stats) = collapse_duplicates(lines, options.collapse_threshold, options.unpaired_policy);

    if options.normalize_spacing {
        (normalize_spacing(&collapsed), stats)
    } else {
        (collapsed, stats)
    }
}

/// Clean a whole transcript held in memory
pub fn clean_text(content: &str, options: &CleanOptions) -> (String, CollapseStats) {
    let (lines, stats) = clean_lines(&split_lines(content), options);
    (lines.concat(), stats)
}

/// Read `input_path`, clean it and write the result to `output_path`.
///
/// Any I/O failure aborts the whole operation; nothing is written unless the
/// complete output is ready.
pub fn clean_transcript<P1: AsRef<Path>, P2: AsRef<Path>>(
    input_path: P1,
    output_path: P2,
    options: &CleanOptions,
) -> Result<CleanReport, CleanError> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    let content = FileManager::read_to_string(input_path)?;
    let lines = split_lines(&content);
    let (cleaned, stats) = clean_lines(&lines, options);

    FileManager::write_atomic(output_path, &cleaned.concat())?;

    if stats.unpaired_timing_lines > 0 {
        warn!(
            "{} timing line(s) in {:?} had no speaker tag on the next line",
            stats.unpaired_timing_lines, input_path
        );
    }
    info!(
        "Cleaned {:?}: {} cue(s), {} run(s) collapsed, {} repeat(s) removed",
        input_path, stats.cues_seen, stats.runs_collapsed, stats.cues_removed
    );

    Ok(CleanReport {
        input_lines: lines.len(),
        output_lines: cleaned.len(),
        stats,
    })
}
