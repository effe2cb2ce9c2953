/*!
 * Collapsing of pathological repeat runs.
 *
 * Speech-to-text engines occasionally loop and emit the same speaker/text cue
 * many times in a row. The collapser buffers consecutive cues sharing the same
 * (speaker, text) key and, once the run ends, either keeps only its first cue
 * (run length at or above the threshold) or emits every cue unchanged.
 *
 * Every emitted cue is followed by exactly one blank line. Passthrough lines
 * are emitted the moment they are seen, so they may land ahead of a run that
 * is still being buffered.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cue_stream::{Cue, CueElement, CueStream};

/// Runs of this many identical cues or more are reduced to their first cue
pub const DEFAULT_COLLAPSE_THRESHOLD: usize = 3;

/// Separator emitted after every cue
pub const BLANK_LINE: &str = "\n";

/// What to do with a timing line whose next line has no speaker tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnpairedPolicy {
    /// Consume both lines and emit nothing; the current run is left untouched
    #[default]
    Drop,
    /// Emit both lines verbatim as passthrough lines
    Passthrough,
}

/// Counters gathered over one collapse pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollapseStats {
    /// Cues recognized in the input
    pub cues_seen: usize,
    /// Runs reduced to their first cue
    pub runs_collapsed: usize,
    /// Cues removed by collapsing
    pub cues_removed: usize,
    /// Timing lines not followed by a speaker-tagged line
    pub unpaired_timing_lines: usize,
}

#[derive(Debug, Default)]
enum RunState {
    #[default]
    Idle,
    // Non-empty; every cue shares the key of the first one
    Accumulating(Vec<Cue>),
}

/// Stateful collapser for a single transcript
#[derive(Debug)]
pub struct RunCollapser {
    threshold: usize,
    unpaired_policy: UnpairedPolicy,
    state: RunState,
    output: Vec<String>,
    stats: CollapseStats,
}

impl Default for RunCollapser {
    fn default() -> Self {
        Self::new(DEFAULT_COLLAPSE_THRESHOLD)
    }
}

impl RunCollapser {
    /// Create a collapser; `threshold` is the shortest run that gets collapsed
    pub fn new(threshold: usize) -> Self {
        RunCollapser {
            threshold,
            unpaired_policy: UnpairedPolicy::default(),
            state: RunState::Idle,
            output: Vec::new(),
            stats: CollapseStats::default(),
        }
    }

    pub fn with_unpaired_policy(mut self, policy: UnpairedPolicy) -> Self {
        self.unpaired_policy = policy;
        self
    }

    pub fn stats(&self) -> &CollapseStats {
        &self.stats
    }

    /// Feed one classified element
    pub fn push(&mut self, element: CueElement) {
        match element {
            CueElement::Passthrough(line) => self.output.push(line),
            CueElement::Cue(cue) => self.push_cue(cue),
            CueElement::UnpairedTiming { timing_line, next_line } => {
                self.stats.unpaired_timing_lines += 1;
                match self.unpaired_policy {
                    UnpairedPolicy::Drop => {
                        debug!("Dropping timing line without speaker tag: {}", timing_line.trim());
                    }
                    UnpairedPolicy::Passthrough => {
                        self.output.push(timing_line);
                        self.output.push(next_line);
                    }
                }
            }
        }
    }

    fn push_cue(&mut self, cue: Cue) {
        self.stats.cues_seen += 1;
        self.state = match std::mem::take(&mut self.state) {
            RunState::Accumulating(mut run) if run[0].same_key(&cue) => {
                run.push(cue);
                RunState::Accumulating(run)
            }
            RunState::Accumulating(run) => {
                self.flush_run(run);
                RunState::Accumulating(vec![cue])
            }
            RunState::Idle => RunState::Accumulating(vec![cue]),
        };
    }

    fn flush_run(&mut self, run: Vec<Cue>) {
        let run_length = run.len();

        if run_length >= self.threshold {
            self.stats.runs_collapsed += 1;
            self.stats.cues_removed += run_length - 1;

            if let Some(first) = run.into_iter().next() {
                debug!(
                    "Collapsed {} repeats of <{}> \"{}\" to the cue at {}",
                    run_length, first.speaker, first.text, first.start_time
                );
                self.emit_cue(first);
            }
        } else {
            for cue in run {
                self.emit_cue(cue);
            }
        }
    }

    fn emit_cue(&mut self, cue: Cue) {
        self.output.push(cue.timing_line);
        self.output.push(cue.dialogue_line);
        self.output.push(BLANK_LINE.to_string());
    }

    /// Flush the pending run and return the collapsed lines with the pass statistics
    pub fn finish(mut self) -> (Vec<String>, CollapseStats) {
        if let RunState::Accumulating(run) = std::mem::take(&mut self.state) {
            self.flush_run(run);
        }
        (self.output, self.stats)
    }
}

/// Classify `lines` and collapse repeat runs in a single pass
pub fn collapse_duplicates<S: AsRef<str>>(
    lines: &[S],
    threshold: usize,
    unpaired_policy: UnpairedPolicy,
) -> (Vec<String>, CollapseStats) {
    let mut collapser = RunCollapser::new(threshold).with_unpaired_policy(unpaired_policy);
    for element in CueStream::new(lines) {
        collapser.push(element);
    }
    collapser.finish()
}
