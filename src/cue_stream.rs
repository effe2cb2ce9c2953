use once_cell::sync::Lazy;
use regex::Regex;

// @module: Classification of raw caption lines into cues and passthrough lines

// @const: WebVTT timing line, anchored at the start only so cue settings may follow
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}) --> ([0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3})").unwrap()
});

// @const: Voice span carrying the speaker, searched anywhere in the line
static SPEAKER_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<v ([^>]+)>(.*)").unwrap()
});

/// A timing line paired with a speaker-tagged dialogue line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Raw timing line, terminator included
    pub timing_line: String,

    // @field: Raw dialogue line, terminator included
    pub dialogue_line: String,

    // @field: Start timestamp as written
    pub start_time: String,

    // @field: End timestamp as written
    pub end_time: String,

    // @field: Trimmed speaker name
    pub speaker: String,

    // @field: Trimmed dialogue text
    pub text: String,
}

impl Cue {
    /// Build a cue from a timing line and the line after it.
    ///
    /// Returns `None` unless the timing line matches the timestamp pattern
    /// and the dialogue line carries a `<v SPEAKER>` tag.
    pub fn from_lines(timing_line: &str, dialogue_line: &str) -> Option<Self> {
        let (start_time, end_time) = parse_timing_line(timing_line)?;
        let (speaker, text) = parse_speaker_tag(dialogue_line)?;

        Some(Cue {
            timing_line: timing_line.to_string(),
            dialogue_line: dialogue_line.to_string(),
            start_time,
            end_time,
            speaker,
            text,
        })
    }

    /// Two cues belong to the same run when speaker and text are identical
    pub fn same_key(&self, other: &Cue) -> bool {
        self.speaker == other.speaker && self.text == other.text
    }
}

/// One classified element of a caption line stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueElement {
    /// Any line that is not the start of a timing+dialogue pair
    Passthrough(String),

    /// A recognized cue; both of its lines were consumed
    Cue(Cue),

    /// A timing line whose next line has no speaker tag; both lines were consumed
    UnpairedTiming {
        timing_line: String,
        next_line: String,
    },
}

/// Extract the start and end timestamps of a timing line.
///
/// Surrounding whitespace (including the line terminator) is ignored.
pub fn parse_timing_line(line: &str) -> Option<(String, String)> {
    let captures = TIMING_REGEX.captures(line.trim())?;
    Some((captures[1].to_string(), captures[2].to_string()))
}

/// Extract the trimmed speaker and text of a `<v SPEAKER>TEXT` dialogue line
pub fn parse_speaker_tag(line: &str) -> Option<(String, String)> {
    let captures = SPEAKER_TAG_REGEX.captures(line.trim())?;
    Some((captures[1].trim().to_string(), captures[2].trim().to_string()))
}

/// Pull-based classifier over a slice of raw lines.
///
/// A line is only ever inspected as the first half of a pair while at least
/// one line follows it, so a trailing line that is not consumed as a dialogue
/// line never comes out of the stream.
pub struct CueStream<'a, S> {
    lines: &'a [S],
    position: usize,
}

impl<'a, S: AsRef<str>> CueStream<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        CueStream { lines, position: 0 }
    }
}

impl<S: AsRef<str>> Iterator for CueStream<'_, S> {
    type Item = CueElement;

    fn next(&mut self) -> Option<CueElement> {
        if self.position + 1 >= self.lines.len() {
            return None;
        }

        let line = self.lines[self.position].as_ref();
        if parse_timing_line(line).is_none() {
            self.position += 1;
            return Some(CueElement::Passthrough(line.to_string()));
        }

        let next_line = self.lines[self.position + 1].as_ref();
        self.position += 2;

        match Cue::from_lines(line, next_line) {
            Some(cue) => Some(CueElement::Cue(cue)),
            None => Some(CueElement::UnpairedTiming {
                timing_line: line.to_string(),
                next_line: next_line.to_string(),
            }),
        }
    }
}
