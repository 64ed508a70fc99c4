//! Data model types for TCU to CSV conversion.

mod header;
mod summary;

pub use header::{HeaderRow, SlotError};
pub use summary::ConversionSummary;
