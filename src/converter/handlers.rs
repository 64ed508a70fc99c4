//! Record handlers, one per handled record kind.

use super::Session;
use crate::config::{COMMENT_PREFIX, HEADER_WIDTH, TIME_SLICE_MARKER, TRIGGER_SEPARATOR};
use crate::error::Result;
use crate::parser::{parse_position, Line, RecordKind};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Handle one line whose keyword names a record kind.
pub(super) fn handle<R: BufRead, W: Write>(
    kind: RecordKind,
    line: &Line<'_>,
    session: &mut Session<R, W>,
) -> Result<()> {
    match kind {
        RecordKind::Clock
        | RecordKind::Observer
        | RecordKind::Record
        | RecordKind::String
        | RecordKind::Timeout => discard(session),
        RecordKind::Date if session.options.date_comments => annotate(
            kind,
            |line| Annotation::Comment(date_comment(line)),
            line,
            session,
        ),
        RecordKind::Date => discard(session),
        RecordKind::Time => annotate(kind, time_comment, line, session),
        RecordKind::Trigger => annotate(
            kind,
            |line| Annotation::Comment(trigger_comment(line)),
            line,
            session,
        ),
        RecordKind::Delay => annotate(kind, delay_comment, line, session),
        RecordKind::Connector => connector(line, session),
    }
}

fn discard<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    session.summary.discarded_lines += 1;
    Ok(())
}

/// What an annotated record turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// A comment row to write.
    Comment(String),
    /// The line carries nothing to annotate.
    Skip,
    /// The line has the annotation's shape but no value token.
    MissingValue,
}

/// Write the comment built by `build`, if comments are enabled.
fn annotate<R: BufRead, W: Write>(
    kind: RecordKind,
    build: impl Fn(&Line<'_>) -> Annotation,
    line: &Line<'_>,
    session: &mut Session<R, W>,
) -> Result<()> {
    if !session.options.include_comments {
        return discard(session);
    }

    match build(line) {
        Annotation::Comment(comment) => session.write_comment(&comment),
        Annotation::MissingValue => {
            warn!("{} line without a value: {:?}", kind, line.tokens());
            session.summary.malformed_lines += 1;
            Ok(())
        }
        Annotation::Skip => {
            debug!("{} line without annotation: {:?}", kind, line.tokens());
            discard(session)
        }
    }
}

fn is_time_slice(line: &Line<'_>) -> bool {
    match (line.keyword(), line.field(1)) {
        (Some(keyword), Some(marker)) => {
            marker == TIME_SLICE_MARKER || format!("{keyword}{marker}") == TIME_SLICE_MARKER
        }
        _ => false,
    }
}

/// `Time Slice: <v>` becomes `#Time Slice:<v>`. Other time lines are skipped.
pub fn time_comment(line: &Line<'_>) -> Annotation {
    if !is_time_slice(line) {
        return Annotation::Skip;
    }
    match line.field(2) {
        Some(value) => Annotation::Comment(format!("{COMMENT_PREFIX}Time Slice:{value}")),
        None => Annotation::MissingValue,
    }
}

/// Every token joined with no separator; lone `,` tokens become a space.
pub fn trigger_comment(line: &Line<'_>) -> String {
    let mut comment = String::from(COMMENT_PREFIX);
    for token in line.tokens() {
        if *token == TRIGGER_SEPARATOR {
            comment.push(' ');
        } else {
            comment.push_str(token);
        }
    }
    comment
}

/// `Delay <a> <v>` becomes `#Delay:<v>%`.
pub fn delay_comment(line: &Line<'_>) -> Annotation {
    match line.field(2) {
        Some(value) => Annotation::Comment(format!("{COMMENT_PREFIX}Delay:{value}%")),
        None => Annotation::MissingValue,
    }
}

/// Every token joined with no separator.
pub fn date_comment(line: &Line<'_>) -> String {
    let mut comment = String::from(COMMENT_PREFIX);
    comment.extend(line.tokens().iter().copied());
    comment
}

/// Assemble the header row from this line and the next seven input lines.
///
/// The seven lookahead lines are taken straight from the session's source,
/// so the dispatcher never sees them. The header row is written even when
/// some entries were unusable.
fn connector<R: BufRead, W: Write>(first: &Line<'_>, session: &mut Session<R, W>) -> Result<()> {
    apply_connector_line(first, session);

    for _ in 1..HEADER_WIDTH {
        match session.source.next_line() {
            Some(Ok(raw)) => apply_connector_line(&Line::tokenize(&raw), session),
            Some(Err(err)) => {
                warn!("Error reading header info: {}", err);
                session.summary.read_errors += 1;
            }
            None => {
                warn!("Input ended inside a connector block");
                break;
            }
        }
    }

    session.write_header()
}

/// A connector line's position and, if present, its channel name.
///
/// The position is token 1 (`Connector 3: NAME`). A labelled line
/// (`Connector LBL 3: NAME`) carries it in token 2 instead.
fn connector_entry<'a>(line: &Line<'a>) -> Option<(i64, Option<&'a str>)> {
    if let Ok(position) = parse_position(line.field(1)?) {
        return Some((position, line.field(2)));
    }

    let labelled = line.field(2).filter(|token| token.ends_with(':'))?;
    let position = parse_position(labelled).ok()?;
    Some((position, line.field(3)))
}

fn apply_connector_line<R: BufRead, W: Write>(line: &Line<'_>, session: &mut Session<R, W>) {
    if line.kind() != Some(RecordKind::Connector) {
        debug!("Non-connector line inside connector block: {:?}", line.tokens());
    }

    match connector_entry(line) {
        Some((position, Some(name))) => {
            if let Err(err) = session.header.set(position, name) {
                warn!("Skipping connector entry: {}", err);
                session.summary.malformed_lines += 1;
            }
        }
        Some((position, None)) => {
            warn!("Connector position {} has no channel name", position);
            session.summary.malformed_lines += 1;
        }
        None => debug!("Connector line without a position: {:?}", line.tokens()),
    }
}
