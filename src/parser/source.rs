//! Line source over the TCU input stream.

use crate::config::MAX_CONSECUTIVE_READ_ERRORS;
use std::io::{BufRead, ErrorKind};
use thiserror::Error;
use tracing::warn;

/// A line that could not be read. Reading continues with the next line.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// The single read cursor over the input.
///
/// Both the dispatcher and the connector handler pull from the same source,
/// so every line is handed out exactly once and in file order.
pub struct LineSource<R> {
    reader: R,
    /// Raw bytes of the line being read.
    buffer: Vec<u8>,
    /// Lines handed out so far.
    lines_read: usize,
    /// Lines that were not valid UTF-8.
    lossy_lines: usize,
    consecutive_errors: usize,
    exhausted: bool,
}

impl<R: BufRead> LineSource<R> {
    /// Create a new source over a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            lines_read: 0,
            lossy_lines: 0,
            consecutive_errors: 0,
            exhausted: false,
        }
    }

    /// Pull the next line, without its line terminator.
    ///
    /// Returns `None` at end of stream.
    pub fn next_line(&mut self) -> Option<Result<String, ReadError>> {
        if self.exhausted {
            return None;
        }

        self.buffer.clear();
        loop {
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => {
                    self.exhausted = true;
                    return None;
                }
                Ok(_) => {
                    self.consecutive_errors = 0;
                    self.lines_read += 1;
                    return Some(Ok(self.decode()));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.consecutive_errors += 1;
                    if self.consecutive_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                        self.exhausted = true;
                    }
                    return Some(Err(ReadError::Io {
                        line: self.lines_read + 1,
                        source: e,
                    }));
                }
            }
        }
    }

    /// Number of lines consumed from the input so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Number of lines decoded with replacement characters.
    pub fn lossy_lines(&self) -> usize {
        self.lossy_lines
    }

    /// Decode the buffered line. Bytes that are not valid UTF-8 become
    /// U+FFFD so the line is still converted.
    fn decode(&mut self) -> String {
        let mut bytes = std::mem::take(&mut self.buffer);
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }
        match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(err) => {
                warn!("line {}: invalid UTF-8, replacing bad bytes", self.lines_read);
                self.lossy_lines += 1;
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        }
    }
}
