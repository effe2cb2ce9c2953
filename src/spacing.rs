// @module: Blank-line normalization

/// A line is blank when nothing but whitespace remains after trimming
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Tracks whether the last accepted line was blank
#[derive(Debug, Default)]
pub struct SpacingNormalizer {
    previous_was_blank: bool,
}

impl SpacingNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `line` should be kept.
    ///
    /// Non-blank lines are always kept; a blank line is kept only when the
    /// previously kept line was not blank.
    pub fn accept(&mut self, line: &str) -> bool {
        if is_blank(line) {
            if self.previous_was_blank {
                return false;
            }
            self.previous_was_blank = true;
        } else {
            self.previous_was_blank = false;
        }
        true
    }
}

/// Collapse every run of consecutive blank lines to a single blank line
pub fn normalize_spacing<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut normalizer = SpacingNormalizer::new();
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| normalizer.accept(line))
        .map(str::to_string)
        .collect()
}
