/*!
 * Tabular export of diarized captions.
 *
 * Produces one row per cue with its start, end, speaker and content, for
 * review in a spreadsheet (CSV) or by other tools (JSON). Parsing here is
 * deliberately looser than the cleaning pass: any line holding `-->` counts
 * as a timing line, and the line after it is read as the dialogue.
 */

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};
use serde::Serialize;

use crate::errors::ExportError;
use crate::file_utils::FileManager;
use crate::transcript_cleaner::split_lines;
use crate::word_count::{csv_writer, finish_csv};

/// One exported cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CueRow {
    pub start: String,
    pub end: String,
    pub speaker: String,
    pub content: String,
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Csv,
    Json,
}

impl TableFormat {
    /// Pick a format from an output file extension, if it names one
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        extension.parse().ok()
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for TableFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// All cues of a transcript in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CueTable {
    pub rows: Vec<CueRow>,
}

impl CueTable {
    /// Parse every timing line followed by a `<v SPEAKER>` line
    pub fn parse(content: &str) -> Self {
        let lines = split_lines(content);
        let mut rows = Vec::new();
        let mut index = 0;

        while index < lines.len() {
            let line = lines[index].trim();
            if !line.contains("-->") {
                index += 1;
                continue;
            }

            let Some((start, end)) = line.split_once(" --> ") else {
                warn!("Skipping malformed timing line: {}", line);
                index += 1;
                continue;
            };

            match lines.get(index + 1).and_then(|dialogue| parse_dialogue(dialogue)) {
                Some((speaker, content)) => rows.push(CueRow {
                    start: start.trim().to_string(),
                    end: end.trim().to_string(),
                    speaker,
                    content,
                }),
                None => debug!("No speaker tag after timing line: {}", line),
            }
            index += 2;
        }

        CueTable { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut writer = csv_writer(&["Start", "End", "Speaker", "Content"])?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        finish_csv(writer)
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }

    pub fn render(&self, format: TableFormat) -> Result<String, ExportError> {
        match format {
            TableFormat::Csv => self.to_csv(),
            TableFormat::Json => self.to_json(),
        }
    }

    /// Render in `format` and write atomically to `path`
    pub fn write_to<P: AsRef<Path>>(&self, path: P, format: TableFormat) -> Result<(), ExportError> {
        let rendered = self.render(format)?;
        FileManager::write_atomic(path, &rendered)?;
        Ok(())
    }
}

// Speaker sits between "<v " and the first '>' after it; content is the rest
fn parse_dialogue(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    let tag_start = line.find("<v ")?;
    let (speaker, content) = line[tag_start + 3..].split_once('>')?;
    Some((speaker.trim().to_string(), content.trim().to_string()))
}
