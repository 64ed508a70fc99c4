//! Configuration constants and settings for the converter.

/// Number of channel slots in the header row.
pub const HEADER_WIDTH: usize = 8;

/// Prefix marking an annotation row in the CSV output.
pub const COMMENT_PREFIX: &str = "#";

/// Joined form of the first two tokens of a time slice line (`Time Slice: 5`).
pub const TIME_SLICE_MARKER: &str = "TimeSlice:";

/// Trigger token rewritten to a single space.
pub const TRIGGER_SEPARATOR: &str = ",";

/// Consecutive I/O failures after which the input is treated as exhausted.
pub const MAX_CONSECUTIVE_READ_ERRORS: usize = 16;

/// Options fixed for the whole conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Emit annotation rows for `Time`, `Trigger` and `Delay` records.
    pub include_comments: bool,
    /// Route `Date` records to the date annotation instead of discarding them.
    pub date_comments: bool,
}

impl ConvertOptions {
    /// Create options with comment inclusion set.
    pub fn new(include_comments: bool) -> Self {
        Self {
            include_comments,
            ..Default::default()
        }
    }

    /// Enable the `Date` annotation.
    pub fn with_date_comments(mut self, enabled: bool) -> Self {
        self.date_comments = enabled;
        self
    }
}
