use crate::traits::{ProbeResult, TraceReader, first_content_line};
use crate::{Error, Result};
use rankscope_types::{EventRecord, EventStream, MAX_RANK, Rank, Timestamp, parse_timestamp};

const BEGIN_MARKER: char = '<';

/// One decoded line of the simple format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleLine<'a> {
    pub rank: Rank,
    pub time: Timestamp,
    pub begin: bool,
    /// Token with the marker stripped
    pub name: &'a str,
}

/// Decode a single non-empty line. `number` is only used for error reporting.
pub fn parse_line(line: &str, number: usize) -> Result<SimpleLine<'_>> {
    let mut tokens = line.split_whitespace();
    let (Some(rank), Some(stamp), Some(token)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(Error::malformed_row(
            number,
            line,
            "expected RANK TIMESTAMP MARKERNAME",
        ));
    };
    if tokens.next().is_some() {
        return Err(Error::malformed_row(
            number,
            line,
            "unexpected field after event name",
        ));
    }

    let rank = rank
        .parse::<Rank>()
        .ok()
        .filter(|rank| *rank <= MAX_RANK)
        .ok_or_else(|| Error::malformed_row(number, line, format!("invalid rank '{}'", rank)))?;

    let time = parse_timestamp(stamp).map_err(|_| Error::MalformedTimestamp {
        line: number,
        raw: line.to_string(),
        stamp: stamp.to_string(),
    })?;

    let mut chars = token.chars();
    let marker = chars.next().unwrap_or(BEGIN_MARKER);
    let name = chars.as_str();
    let begin = marker == BEGIN_MARKER;

    if begin && name.is_empty() {
        return Err(Error::malformed_row(number, line, "begin without event name"));
    }

    Ok(SimpleLine {
        rank,
        time,
        begin,
        name,
    })
}

/// Parse simple-format text into records in file order.
///
/// File order defines nesting, so records are never reordered. End records
/// do not name the interval they close.
pub fn parse_simple(text: &str) -> Result<EventStream> {
    let mut stream = EventStream::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let number = index + 1;
        let parsed = parse_line(line, number)?;

        let record = if parsed.begin {
            let id = stream.names.intern(parsed.name);
            EventRecord::begin(parsed.rank, parsed.time, id, number)
        } else {
            EventRecord::end(parsed.rank, parsed.time, None, number)
        };
        stream.push(record);
    }

    tracing::debug!(
        records = stream.len(),
        names = stream.names.len(),
        "read simple trace"
    );

    Ok(stream)
}

/// Reader for the simple line format
pub struct SimpleReader;

impl TraceReader for SimpleReader {
    fn id(&self) -> &'static str {
        "simple"
    }

    fn probe(&self, text: &str) -> ProbeResult {
        match first_content_line(text) {
            Some((number, line)) if parse_line(line, number).is_ok() => ProbeResult::match_high(),
            _ => ProbeResult::NoMatch,
        }
    }

    fn read_str(&self, text: &str) -> Result<EventStream> {
        parse_simple(text)
    }
}
