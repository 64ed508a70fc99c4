//! TCU input parsing: the shared line cursor and record tokenisation.

mod record;
mod source;

pub use record::{parse_position, Line, RecordKind};
pub use source::{LineSource, ReadError};
