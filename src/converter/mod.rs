//! Conversion session: the dispatch loop and the state handlers share.

mod handlers;

pub use handlers::{date_comment, delay_comment, time_comment, trigger_comment, Annotation};

use crate::config::ConvertOptions;
use crate::error::Result;
use crate::model::{ConversionSummary, HeaderRow};
use crate::parser::{Line, LineSource};
use std::io::{BufRead, Write};
use tracing::{debug, error};

/// State for one conversion run.
///
/// Owns the input cursor, the CSV sink and the header row. Handlers receive
/// the session by mutable reference; nothing is global.
pub struct Session<R, W: Write> {
    source: LineSource<R>,
    writer: csv::Writer<W>,
    options: ConvertOptions,
    header: HeaderRow,
    summary: ConversionSummary,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session reading TCU lines from `reader` and writing CSV to `writer`.
    pub fn new(reader: R, writer: W, options: ConvertOptions) -> Self {
        let writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        Self {
            source: LineSource::new(reader),
            writer,
            options,
            header: HeaderRow::new(),
            summary: ConversionSummary::default(),
        }
    }

    /// Process every remaining line until end of stream.
    ///
    /// Read failures are logged and skipped. Only a failure to write the
    /// output stops the loop.
    pub fn run(&mut self) -> Result<()> {
        while let Some(next) = self.source.next_line() {
            match next {
                Ok(raw) => self.dispatch(&raw)?,
                Err(err) => {
                    error!("Read error: {}", err);
                    self.summary.read_errors += 1;
                }
            }
        }
        Ok(())
    }

    /// Route one raw line to its handler, or write it through unchanged.
    pub fn dispatch(&mut self, raw: &str) -> Result<()> {
        let line = Line::tokenize(raw);
        if line.is_empty() {
            self.summary.blank_lines += 1;
            return Ok(());
        }

        match line.kind() {
            Some(kind) => {
                debug!("{} record", kind);
                handlers::handle(kind, &line, self)
            }
            None => {
                // TODO: decode the hex timestamp columns instead of passing them through.
                self.writer.write_record(line.tokens())?;
                self.summary.passthrough_rows += 1;
                Ok(())
            }
        }
    }

    /// Flush the sink and return the run summary.
    ///
    /// This is the only place the output is flushed.
    pub fn finish(mut self) -> Result<ConversionSummary> {
        self.writer.flush()?;
        self.summary.lines_read = self.source.lines_read();
        self.summary.lossy_lines = self.source.lossy_lines();
        Ok(self.summary)
    }

    fn write_comment(&mut self, comment: &str) -> Result<()> {
        self.writer.write_record([comment])?;
        self.summary.comment_rows += 1;
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(self.header.fields())?;
        self.summary.header_rows += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{BufReader, Cursor, Read};

    fn run(input: &str, options: ConvertOptions) -> (String, ConversionSummary) {
        let mut output = Vec::new();
        let mut session = Session::new(Cursor::new(input.as_bytes()), &mut output, options);
        session.run().unwrap();
        let summary = session.finish().unwrap();
        (String::from_utf8(output).unwrap(), summary)
    }

    #[test]
    fn test_passthrough_rows() {
        let (csv, summary) = run("570B395A  1.5 -2\n  foo\tbar \n", ConvertOptions::default());
        assert_eq!(csv, "570B395A,1.5,-2\nfoo,bar\n");
        assert_eq!(summary.passthrough_rows, 2);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let (csv, summary) = run("\n   \nA B\n\t\n", ConvertOptions::default());
        assert_eq!(csv, "A,B\n");
        assert_eq!(summary.blank_lines, 3);
        assert_eq!(summary.lines_read, 4);
    }

    #[test]
    fn test_passthrough_quotes_fields_when_needed() {
        let (csv, _) = run("a \"b\" c,d\n", ConvertOptions::default());
        assert_eq!(csv, "a,\"\"\"b\"\"\",\"c,d\"\n");
    }

    #[test]
    fn test_discarded_keywords_never_write() {
        let input = "Clock 1\nDate 2016-04-11\nObserver x\nRecord 5\nString abc\nTimeout 9\n";
        for comments in [false, true] {
            let (csv, summary) = run(input, ConvertOptions::new(comments));
            assert_eq!(csv, "");
            assert_eq!(summary.discarded_lines, 6);
        }
    }

    #[test]
    fn test_annotations_need_comments() {
        let input = "Time Slice: 5\nTrigger A , B\nDelay X 50\n";
        let (csv, summary) = run(input, ConvertOptions::new(false));
        assert_eq!(csv, "");
        assert_eq!(summary.discarded_lines, 3);

        let (csv, summary) = run(input, ConvertOptions::new(true));
        assert_eq!(csv, "#Time Slice:5\n#TriggerA B\n#Delay:50%\n");
        assert_eq!(summary.comment_rows, 3);
    }

    #[test]
    fn test_date_comments_option() {
        let input = "Date 11 Apr 2016\n";
        let options = ConvertOptions::new(true).with_date_comments(true);
        let (csv, _) = run(input, options);
        assert_eq!(csv, "#Date11Apr2016\n");

        let options = ConvertOptions::new(false).with_date_comments(true);
        let (csv, _) = run(input, options);
        assert_eq!(csv, "");
    }

    #[test]
    fn test_malformed_delay_continues() {
        let (csv, summary) = run("Delay X\nA B\n", ConvertOptions::new(true));
        assert_eq!(csv, "A,B\n");
        assert_eq!(summary.malformed_lines, 1);
    }

    #[test]
    fn test_dispatch_single_line() {
        let mut output = Vec::new();
        let options = ConvertOptions::new(true);
        let mut session = Session::new(Cursor::new(&b""[..]), &mut output, options);
        session.dispatch("Delay a 75").unwrap();
        session.dispatch("1 2 3").unwrap();
        let summary = session.finish().unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "#Delay:75%\n1,2,3\n");
        assert_eq!(summary.records_written(), 2);
    }

    #[test]
    fn test_non_utf8_row_passes_through() {
        let input = b"570B395A 21.5\xb0C 12\n570B395B 22 13\n".to_vec();

        let mut output = Vec::new();
        let options = ConvertOptions::default();
        let mut session = Session::new(Cursor::new(input), &mut output, options);
        session.run().unwrap();
        let summary = session.finish().unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "570B395A,21.5\u{FFFD}C,12\n570B395B,22,13\n"
        );
        assert_eq!(summary.passthrough_rows, 2);
        assert_eq!(summary.lossy_lines, 1);
        assert_eq!(summary.read_errors, 0);
    }

    /// Fails its first read, then serves `data`.
    struct FlakyReader {
        failed: bool,
        data: Cursor<Vec<u8>>,
    }

    impl Read for FlakyReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(std::io::Error::other("transient"));
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn test_read_error_is_logged_and_skipped() {
        let reader = BufReader::new(FlakyReader {
            failed: false,
            data: Cursor::new(b"A 1\nB 2\n".to_vec()),
        });

        let mut output = Vec::new();
        let mut session = Session::new(reader, &mut output, ConvertOptions::default());
        session.run().unwrap();
        let summary = session.finish().unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "A,1\nB,2\n");
        assert_eq!(summary.read_errors, 1);
        assert_eq!(summary.lines_read, 2);
    }
}
