use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::cue_table::{CueTable, TableFormat};
use crate::file_utils::{FileManager, VTT_EXTENSION};
use crate::transcript_cleaner::{CleanOptions, CleanReport, clean_transcript};
use crate::word_count::{WordCountLanguage, WordCountReport, count_speaker_words};

// @module: Application controller for transcript cleaning

// @const: Summary log written next to the files of a cleaned folder
const FOLDER_LOG_FILE: &str = "vttclean.log";

/// Counts of what happened to each file of a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub cleaned: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn clean_options(&self) -> CleanOptions {
        CleanOptions::from(&self.config)
    }

    /// Default output for a single file: `<stem>.<suffix>.vtt` beside the input
    pub fn default_output_path(&self, input_file: &Path) -> PathBuf {
        FileManager::generate_output_path(input_file, &self.config.output_suffix, VTT_EXTENSION)
    }

    /// Clean one transcript.
    ///
    /// Returns `None` when the output already exists and `force_overwrite`
    /// is not set.
    pub fn run(&self, input_file: &Path, output_file: Option<&Path>, force_overwrite: bool) -> Result<Option<CleanReport>> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = match output_file {
            Some(path) => path.to_path_buf(),
            None => self.default_output_path(input_file),
        };

        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
            return Ok(None);
        }

        let report = clean_transcript(input_file, &output_path, &self.clean_options())?;
        info!("Success: {:?}", output_path);

        Ok(Some(report))
    }

    /// Clean every `.vtt` file under `input_dir`, skipping files this tool generated
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let transcripts: Vec<PathBuf> = FileManager::find_files(input_dir, VTT_EXTENSION)?
            .into_iter()
            .filter(|path| !FileManager::is_generated_output(path, &self.config.output_suffix, VTT_EXTENSION))
            .collect();

        if transcripts.is_empty() {
            return Err(anyhow!("No VTT files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(transcripts.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Cleaning files");

        let mut summary = FolderSummary::default();

        for transcript in transcripts.iter() {
            let file_name = transcript.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Cleaning: {}", file_name));

            match self.run(transcript, None, force_overwrite) {
                Ok(Some(_)) => summary.cleaned += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        let summary_message = format!(
            "Folder processing completed: {} cleaned, {} skipped, {} errors in {:.2}s",
            summary.cleaned, summary.skipped, summary.failed, start_time.elapsed().as_secs_f64()
        );
        info!("{}", summary_message);

        let log_file_path = input_dir.join(FOLDER_LOG_FILE);
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &summary_message) {
            warn!("Failed to write folder log to {:?}: {}", log_file_path, e);
        }

        Ok(summary)
    }

    /// Count words per speaker and write the CSV summary.
    ///
    /// The summary goes to `output_file`, or `<stem>_summary.csv` beside the input.
    pub fn count_words(
        &self,
        input_file: &Path,
        language: Option<WordCountLanguage>,
        output_file: Option<&Path>,
    ) -> Result<(WordCountReport, PathBuf)> {
        let language = language.unwrap_or(self.config.word_count_language);
        let content = FileManager::read_to_string(input_file)?;
        let report = count_speaker_words(&content, language);

        let output_path = match output_file {
            Some(path) => path.to_path_buf(),
            None => summary_path(input_file),
        };
        FileManager::write_atomic(&output_path, &report.to_csv()?)?;

        info!(
            "Counted {} {} word(s) across {} speaker(s); summary saved to {:?}",
            report.total(), language.display_name(), report.speakers.len(), output_path
        );

        Ok((report, output_path))
    }

    /// Export every cue of `input_file` as a table.
    ///
    /// Without an explicit format, the output extension decides, falling back to CSV.
    pub fn export_table(&self, input_file: &Path, output_file: &Path, format: Option<TableFormat>) -> Result<CueTable> {
        let format = format
            .or_else(|| TableFormat::from_path(output_file))
            .unwrap_or_default();

        let content = FileManager::read_to_string(input_file)?;
        let table = CueTable::parse(&content);
        if table.is_empty() {
            warn!("No speaker-tagged cues found in {:?}", input_file);
        }

        table.write_to(output_file, format)?;
        info!("Exported {} cue(s) as {} to {:?}", table.len(), format, output_file);

        Ok(table)
    }
}

// `<stem>_summary.csv` in the directory of `input_file`
fn summary_path(input_file: &Path) -> PathBuf {
    let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();
    input_file.with_file_name(format!("{}_summary.csv", stem))
}
