//! tcu-convert-rs - Convert TCU equipment log files to CSV.
//!
//! A TCU file is line oriented. The first word of each line names the record
//! type: data rows are written through as CSV records, a handful of record
//! types become `#` annotation rows or are dropped, and a block of eight
//! `Connector` lines is reassembled into the channel header row.
//!
//! # Example
//!
//! ```no_run
//! use tcu_convert_rs::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! let options = ConvertOptions::new(true);
//! let summary = convert_file(Path::new("run.tcu"), Some(Path::new("run.csv")), &options).unwrap();
//! println!("{} records", summary.records_written());
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod model;
pub mod parser;

// Re-exports for convenience
pub use config::ConvertOptions;
pub use converter::Session;
pub use error::{ConvertError, Result};
pub use model::{ConversionSummary, HeaderRow};
pub use parser::{Line, LineSource, RecordKind};

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Convert TCU lines from `reader` into CSV records on `writer`.
///
/// Runs to end of stream and flushes `writer` once before returning.
pub fn convert<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    options: &ConvertOptions,
) -> Result<ConversionSummary> {
    let mut session = Session::new(reader, writer, *options);
    session.run()?;
    session.finish()
}

/// Convert the TCU file at `input_path`.
///
/// Output goes to `output_path`, or to stdout when it is `None`. Both files
/// are opened before any line is processed.
pub fn convert_file(
    input_path: &Path,
    output_path: Option<&Path>,
    options: &ConvertOptions,
) -> Result<ConversionSummary> {
    if !input_path.exists() {
        return Err(ConvertError::FileNotFound {
            path: input_path.to_path_buf(),
        });
    }

    let input = File::open(input_path).map_err(|source| ConvertError::OpenInput {
        path: input_path.to_path_buf(),
        source,
    })?;

    let summary = match output_path {
        Some(path) => {
            let output = File::create(path).map_err(|source| ConvertError::CreateOutput {
                path: path.to_path_buf(),
                source,
            })?;
            convert(BufReader::new(input), output, options)?
        }
        None => convert(BufReader::new(input), io::stdout().lock(), options)?,
    };

    tracing::info!(
        "Converted {} line(s) into {} record(s)",
        summary.lines_read,
        summary.records_written()
    );

    Ok(summary)
}
