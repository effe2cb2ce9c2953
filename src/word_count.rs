/*!
 * Per-speaker word counting for diarized transcripts.
 *
 * Every `<v SPEAKER>DIALOGUE` span in a document is attributed to its
 * (trimmed) speaker. Only alphabetic words are counted: numbers, timestamps
 * and punctuation never contribute. Apostrophe clitics are split off the way
 * a linguistic tokenizer would split them and are not counted on their own,
 * so `l'homme` is one word in French and `don't` is one word in English.
 */

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ExportError;

// @const: Speaker span; the dialogue runs until the next tag opens
static DIALOGUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<v ([^>]+)>([^<]+)").unwrap()
});

// @const: Letters, optionally joined by apostrophes
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}]+(?:['’][\p{L}\p{M}]+)*").unwrap()
});

// @const: French elided articles and conjunctions (`l'`, `qu'`, ...)
const FRENCH_ELISIONS: &[&str] = &[
    "c", "d", "j", "l", "m", "n", "s", "t", "qu", "jusqu", "lorsqu", "puisqu", "quoiqu",
];

// @const: English contractions split after the apostrophe (`'s`, `n't`, ...)
const ENGLISH_CONTRACTIONS: &[&str] = &["s", "t", "re", "ve", "ll", "d", "m"];

/// Language whose clitic rules apply while counting words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordCountLanguage {
    #[default]
    En,
    Fr,
}

impl WordCountLanguage {
    // @returns: Display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::En => "English",
            Self::Fr => "French",
        }
    }

    fn is_clitic(&self, piece: &str, leading: bool) -> bool {
        let piece = piece.to_lowercase();
        match self {
            Self::Fr => leading && FRENCH_ELISIONS.contains(&piece.as_str()),
            Self::En => !leading && ENGLISH_CONTRACTIONS.contains(&piece.as_str()),
        }
    }
}

impl fmt::Display for WordCountLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::Fr => write!(f, "fr"),
        }
    }
}

impl FromStr for WordCountLanguage {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            _ => Err(ExportError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// Count the alphabetic words of `text`
pub fn count_words(text: &str, language: WordCountLanguage) -> usize {
    WORD_REGEX
        .find_iter(text)
        .map(|word| count_word_pieces(word.as_str(), language))
        .sum()
}

fn count_word_pieces(word: &str, language: WordCountLanguage) -> usize {
    let pieces: Vec<&str> = word.split(['\'', '’']).collect();
    if pieces.len() == 1 {
        return 1;
    }

    let last = pieces.len() - 1;
    let kept = pieces
        .iter()
        .enumerate()
        .filter(|(index, piece)| {
            let leading = *index < last;
            !language.is_clitic(piece, leading)
        })
        .count();

    // Compounds such as "aujourd'hui" carry no clitic and count once
    if kept == pieces.len() { 1 } else { kept }
}

/// Word count attributed to one speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerWordCount {
    pub speaker: String,
    pub word_count: usize,
}

/// Word counts per speaker, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordCountReport {
    pub speakers: Vec<SpeakerWordCount>,
}

impl WordCountReport {
    /// Sum over all speakers
    pub fn total(&self) -> usize {
        self.speakers.iter().map(|entry| entry.word_count).sum()
    }

    /// Count for a given speaker, if that speaker spoke at all
    pub fn get(&self, speaker: &str) -> Option<usize> {
        self.speakers
            .iter()
            .find(|entry| entry.speaker == speaker)
            .map(|entry| entry.word_count)
    }

    /// Render as CSV with a trailing `Total` row
    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut writer = csv_writer(&["Speaker", "Word Count"])?;
        for entry in &self.speakers {
            writer.serialize(entry)?;
        }
        writer.serialize(SpeakerWordCount {
            speaker: "Total".to_string(),
            word_count: self.total(),
        })?;
        finish_csv(writer)
    }
}

impl fmt::Display for WordCountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .speakers
            .iter()
            .map(|entry| entry.speaker.chars().count())
            .chain(std::iter::once("Speaker".len()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{:<width$}  Word Count", "Speaker", width = width)?;
        for entry in &self.speakers {
            writeln!(f, "{:<width$}  {:>10}", entry.speaker, entry.word_count, width = width)?;
        }
        writeln!(f, "{:<width$}  {:>10}", "Total", self.total(), width = width)
    }
}

// Header row is written by hand so serde field names stay free for JSON
pub(crate) fn csv_writer(header: &[&str]) -> Result<csv::Writer<Vec<u8>>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(header)?;
    Ok(writer)
}

pub(crate) fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    // Every field came from a `String`, so the buffer is valid UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Count the words of every speaker in a whole transcript
pub fn count_speaker_words(content: &str, language: WordCountLanguage) -> WordCountReport {
    let mut report = WordCountReport::default();
    let mut index_by_speaker: HashMap<String, usize> = HashMap::new();

    for captures in DIALOGUE_REGEX.captures_iter(content) {
        let speaker = captures[1].trim();
        let word_count = count_words(captures[2].trim(), language);

        match index_by_speaker.get(speaker) {
            Some(&index) => report.speakers[index].word_count += word_count,
            None => {
                index_by_speaker.insert(speaker.to_string(), report.speakers.len());
                report.speakers.push(SpeakerWordCount {
                    speaker: speaker.to_string(),
                    word_count,
                });
            }
        }
    }

    report
}
