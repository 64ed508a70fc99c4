//! Record keywords and line tokenisation.

use std::fmt;
use std::num::ParseIntError;

/// Record types with dedicated handling. Any other keyword is a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Clock,
    Date,
    Time,
    Connector,
    Trigger,
    Delay,
    Observer,
    Record,
    String,
    Timeout,
}

impl RecordKind {
    /// Look up the record kind for a line keyword (case-sensitive).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "Clock" => Some(RecordKind::Clock),
            "Date" => Some(RecordKind::Date),
            "Time" => Some(RecordKind::Time),
            "Connector" => Some(RecordKind::Connector),
            "Trigger" => Some(RecordKind::Trigger),
            "Delay" => Some(RecordKind::Delay),
            "Observer" => Some(RecordKind::Observer),
            "Record" => Some(RecordKind::Record),
            "String" => Some(RecordKind::String),
            "Timeout" => Some(RecordKind::Timeout),
            _ => None,
        }
    }

    /// The keyword that introduces this record kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            RecordKind::Clock => "Clock",
            RecordKind::Date => "Date",
            RecordKind::Time => "Time",
            RecordKind::Connector => "Connector",
            RecordKind::Trigger => "Trigger",
            RecordKind::Delay => "Delay",
            RecordKind::Observer => "Observer",
            RecordKind::Record => "Record",
            RecordKind::String => "String",
            RecordKind::Timeout => "Timeout",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One input line split on whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    /// Split a raw line into whitespace-delimited tokens.
    pub fn tokenize(raw: &'a str) -> Self {
        Self {
            tokens: raw.split_whitespace().collect(),
        }
    }

    /// All tokens, keyword first.
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    /// Token at `index`, if the line has one.
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    /// The record-type keyword (token 0).
    pub fn keyword(&self) -> Option<&'a str> {
        self.field(0)
    }

    /// The handled record kind, or `None` for data rows and blank lines.
    pub fn kind(&self) -> Option<RecordKind> {
        self.keyword().and_then(RecordKind::from_keyword)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Parse a connector position token such as `3:` into a 1-based position.
pub fn parse_position(token: &str) -> Result<i64, ParseIntError> {
    token.trim_matches(':').parse()
}
