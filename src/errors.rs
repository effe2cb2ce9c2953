/*!
 * Error types for the vttclean application.
 *
 * The cleaning core itself never fails on malformed captions; these errors
 * come from the I/O shell around it (reading, writing, configuration and
 * export), using the thiserror crate for ergonomic error definitions.
 */

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while cleaning a transcript file
#[derive(Error, Debug)]
pub enum CleanError {
    /// The input file could not be read (missing, unreadable, not UTF-8)
    #[error("Failed to read {path:?}: {source}")]
    Read {
        /// File that was being read
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be written
    #[error("Failed to write {path:?}: {source}")]
    Write {
        /// File that was being written
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CleanError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read { path: path.to_path_buf(), source }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write { path: path.to_path_buf(), source }
    }
}

/// Errors that can occur when exporting cue tables or word counts
#[derive(Error, Debug)]
pub enum ExportError {
    /// Serializing rows to JSON failed
    #[error("Failed to serialize export: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing CSV rows failed
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Unknown export format name
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Unknown word counting language
    #[error("Unsupported language: {0}. Please use 'fr' for French or 'en' for English")]
    UnsupportedLanguage(String),

    /// Reading the source or writing the export failed
    #[error(transparent)]
    Io(#[from] CleanError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the cleaning pass
    #[error("Clean error: {0}")]
    Clean(#[from] CleanError),

    /// Error from an export
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
