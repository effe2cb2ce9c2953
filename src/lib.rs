/*!
 * # vttclean - caption cleanup for diarized WebVTT transcripts
 *
 * Speech-to-text engines sometimes get stuck and emit the same speaker/text
 * cue over and over. This library removes those loops from WebVTT files with
 * `<v Speaker>` tags and restores tidy spacing afterwards.
 *
 * ## Features
 *
 * - Collapse runs of three or more identical consecutive cues to the first one
 * - Squeeze runs of blank lines to a single blank line
 * - Count words per speaker (English and French clitic rules)
 * - Export cues as a CSV or JSON table
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `cue_stream`: Classifies raw lines into cues and passthrough lines
 * - `run_collapser`: Buffers repeat runs and decides what to emit
 * - `spacing`: Blank-line normalization
 * - `transcript_cleaner`: The full cleaning pass over text and files
 * - `word_count`: Per-speaker word counts
 * - `cue_table`: Tabular cue export
 * - `app_config`: Configuration management
 * - `app_controller`: Single-file and folder workflows
 * - `file_utils`: File system operations
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
pub mod cue_stream;
pub mod cue_table;
pub mod errors;
pub mod file_utils;
pub mod run_collapser;
pub mod spacing;
pub mod transcript_cleaner;
pub mod word_count;

// Re-export main types for easier usage
pub use app_config::Config;
pub use cue_stream::{Cue, CueElement, CueStream};
pub use run_collapser::{CollapseStats, RunCollapser, UnpairedPolicy, collapse_duplicates};
pub use spacing::normalize_spacing;
pub use transcript_cleaner::{CleanOptions, CleanReport, clean_lines, clean_text, clean_transcript};
pub use errors::{AppError, CleanError, ExportError};
