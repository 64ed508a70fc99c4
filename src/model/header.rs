//! HeaderRow - the channel header assembled from connector records.

use crate::config::HEADER_WIDTH;
use thiserror::Error;

/// Why a connector entry could not be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("connector position {0} is outside 1..=8")]
    OutOfRange(i64),
}

/// Fixed-width row of channel names, indexed by 1-based connector position.
///
/// Slots keep their value until a later connector entry overwrites them,
/// including across several connector blocks in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRow {
    slots: [String; HEADER_WIDTH],
}

impl HeaderRow {
    /// Create a header with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `name` at 1-based `position`.
    pub fn set(&mut self, position: i64, name: &str) -> Result<(), SlotError> {
        let slot = Self::slot_index(position).ok_or(SlotError::OutOfRange(position))?;
        self.slots[slot] = name.to_string();
        Ok(())
    }

    /// All slots in column order.
    pub fn fields(&self) -> &[String; HEADER_WIDTH] {
        &self.slots
    }

    fn slot_index(position: i64) -> Option<usize> {
        let slot = usize::try_from(position).ok()?.checked_sub(1)?;
        (slot < HEADER_WIDTH).then_some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_header_is_empty() {
        let header = HeaderRow::new();
        assert!(header.fields().iter().all(String::is_empty));
        assert_eq!(header.fields().len(), HEADER_WIDTH);
    }

    #[test]
    fn test_set_is_one_based() {
        let mut header = HeaderRow::new();
        header.set(1, "$FSDEZ").unwrap();
        header.set(8, "SMETER").unwrap();
        assert_eq!(header.fields()[0], "$FSDEZ");
        assert_eq!(header.fields()[7], "SMETER");
        assert_eq!(header.fields()[3], "");
    }

    #[test]
    fn test_set_overwrites() {
        let mut header = HeaderRow::new();
        header.set(2, "$BFFHR").unwrap();
        header.set(2, "$BFBRM").unwrap();
        assert_eq!(header.fields()[1], "$BFBRM");
    }

    #[test]
    fn test_out_of_range_positions() {
        let mut header = HeaderRow::new();
        assert_eq!(header.set(0, "X"), Err(SlotError::OutOfRange(0)));
        assert_eq!(header.set(9, "X"), Err(SlotError::OutOfRange(9)));
        assert_eq!(header.set(-1, "X"), Err(SlotError::OutOfRange(-1)));
        assert_eq!(header, HeaderRow::new());
    }
}
