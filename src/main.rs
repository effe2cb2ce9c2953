// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use vttclean::app_config::{self, Config};
use vttclean::app_controller::Controller;
use vttclean::cue_table::TableFormat;
use vttclean::run_collapser::UnpairedPolicy;
use vttclean::word_count::WordCountLanguage;

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

/// CLI Wrapper for WordCountLanguage to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLanguage {
    #[value(alias = "EN")]
    En,
    #[value(alias = "FR")]
    Fr,
}

impl From<CliLanguage> for WordCountLanguage {
    fn from(cli_language: CliLanguage) -> Self {
        match cli_language {
            CliLanguage::En => WordCountLanguage::En,
            CliLanguage::Fr => WordCountLanguage::Fr,
        }
    }
}

/// CLI Wrapper for TableFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTableFormat {
    Csv,
    Json,
}

impl From<CliTableFormat> for TableFormat {
    fn from(cli_format: CliTableFormat) -> Self {
        match cli_format {
            CliTableFormat::Csv => TableFormat::Csv,
            CliTableFormat::Json => TableFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Collapse repeated cues and normalize spacing in a VTT file or folder
    Clean(CleanArgs),

    /// Count words per speaker and save a CSV summary
    Count(CountArgs),

    /// Export cues as a CSV or JSON table
    Table(TableArgs),

    /// Generate shell completions for vttclean
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct CleanArgs {
    /// Input VTT file, or a directory to clean every VTT file in
    #[arg(short, long, value_name = "INPUT_PATH")]
    input: PathBuf,

    /// Output file (single file only; defaults to <stem>.<suffix>.vtt)
    #[arg(short, long, value_name = "OUTPUT_PATH")]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Shortest run of identical cues to collapse
    #[arg(short, long)]
    threshold: Option<usize>,

    /// Keep timing lines that have no speaker tag instead of dropping them
    #[arg(long)]
    keep_unpaired: bool,

    /// Leave blank-line runs as they are
    #[arg(long)]
    no_spacing: bool,
}

#[derive(Parser, Debug)]
struct CountArgs {
    /// Path to the VTT file
    #[arg(long, value_name = "FILE")]
    file: PathBuf,

    /// Language of the VTT file
    #[arg(short, long, value_enum)]
    language: Option<CliLanguage>,

    /// CSV output (defaults to <stem>_summary.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TableArgs {
    /// Input VTT file
    #[arg(short, long)]
    input: PathBuf,

    /// Output table file
    #[arg(short, long)]
    output: PathBuf,

    /// Output format (defaults to the output extension, then CSV)
    #[arg(long, value_enum)]
    format: Option<CliTableFormat>,
}

/// vttclean - caption cleanup for diarized WebVTT transcripts
///
/// Removes cues that a speech-to-text engine repeated verbatim three or
/// more times in a row, and squeezes runs of blank lines.
#[derive(Parser, Debug)]
#[command(name = "vttclean")]
#[command(version)]
#[command(about = "Clean repeated cues out of diarized WebVTT transcripts")]
#[command(long_about = "vttclean removes transcription loops from WebVTT files with <v Speaker> tags.

EXAMPLES:
    vttclean clean -i talk.vtt -o talk.clean.vtt   # Clean one file
    vttclean clean -i transcripts/ -f              # Clean a folder, overwrite outputs
    vttclean clean -i talk.vtt -t 4                # Only collapse runs of 4 or more
    vttclean count --file talk.vtt -l fr           # Word counts per speaker
    vttclean table -i talk.vtt -o talk.json        # Export cues as JSON
    vttclean completions bash > vttclean.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "vttclean", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_or_create_config(&cli.config_path)?;

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    match cli.command {
        Commands::Clean(args) => run_clean(config, args),
        Commands::Count(args) => run_count(config, args),
        Commands::Table(args) => run_table(config, args),
        Commands::Completions { .. } => Ok(()),
    }
}

fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        return Config::from_file(config_path);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();
    config.save(config_path)?;
    Ok(config)
}

fn run_clean(mut config: Config, options: CleanArgs) -> Result<()> {
    if let Some(threshold) = options.threshold {
        config.collapse_threshold = threshold;
    }
    if options.keep_unpaired {
        config.unpaired_policy = UnpairedPolicy::Passthrough;
    }
    if options.no_spacing {
        config.normalize_spacing = false;
    }

    let controller = Controller::with_config(config)?;

    if options.input.is_file() {
        controller.run(&options.input, options.output.as_deref(), options.force_overwrite)?;
    } else if options.input.is_dir() {
        if options.output.is_some() {
            return Err(anyhow!("--output cannot be used when the input is a directory"));
        }
        let summary = controller.run_folder(&options.input, options.force_overwrite)?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) could not be cleaned", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input));
    }

    Ok(())
}

fn run_count(config: Config, options: CountArgs) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let (report, output_path) = controller.count_words(
        &options.file,
        options.language.map(Into::into),
        options.output.as_deref(),
    )?;

    info!("Summary saved to {:?}", output_path);
    print!("{}", report);

    Ok(())
}

fn run_table(config: Config, options: TableArgs) -> Result<()> {
    let controller = Controller::with_config(config)?;
    controller.export_table(&options.input, &options.output, options.format.map(Into::into))?;
    Ok(())
}
