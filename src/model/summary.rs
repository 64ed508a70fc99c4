//! ConversionSummary - counters for one conversion run.

use serde::{Deserialize, Serialize};

/// What happened to the input during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    /// Lines consumed from the input, connector lookahead included.
    pub lines_read: usize,
    /// Lines with no tokens.
    pub blank_lines: usize,
    /// Data rows written through unchanged.
    pub passthrough_rows: usize,
    /// Annotation rows written.
    pub comment_rows: usize,
    /// Header rows written.
    pub header_rows: usize,
    /// Handled lines that produced no output.
    pub discarded_lines: usize,
    /// Lines skipped as malformed.
    pub malformed_lines: usize,
    /// Lines that could not be read.
    pub read_errors: usize,
    /// Lines that were not valid UTF-8, converted with replacement characters.
    pub lossy_lines: usize,
}

impl ConversionSummary {
    /// Total CSV records written.
    pub fn records_written(&self) -> usize {
        self.passthrough_rows + self.comment_rows + self.header_rows
    }
}
