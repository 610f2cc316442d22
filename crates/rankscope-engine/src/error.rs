use rankscope_types::{Rank, Timestamp};
use std::fmt;

/// Result type for rankscope-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or decorating interval forests.
///
/// `line` is the 1-based line of the offending record (or palette entry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// End record with no open interval on its rank
    UnmatchedEnd {
        rank: Rank,
        time: Timestamp,
        line: usize,
    },

    /// Interval still open when the input ended
    UnmatchedBegin {
        rank: Rank,
        name: String,
        line: usize,
    },

    /// End record naming a different interval than the innermost open one
    MismatchedEnd {
        rank: Rank,
        expected: String,
        found: String,
        line: usize,
    },

    /// Record earlier than the previous record on its rank. Within a rank,
    /// begins and ends must be non-decreasing in time or intervals would
    /// invert, escape their parent or overlap a sibling.
    OutOfOrder {
        rank: Rank,
        time: Timestamp,
        previous: Timestamp,
        line: usize,
    },

    /// Rank index above `MAX_RANK`
    RankOutOfRange { rank: Rank, line: usize },

    /// Palette line that is not `name r g b` with components in `[0, 1]`
    MalformedColor { line: usize, raw: String },
}

impl Error {
    pub fn line(&self) -> usize {
        match self {
            Error::UnmatchedEnd { line, .. }
            | Error::UnmatchedBegin { line, .. }
            | Error::MismatchedEnd { line, .. }
            | Error::OutOfOrder { line, .. }
            | Error::RankOutOfRange { line, .. }
            | Error::MalformedColor { line, .. } => *line,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnmatchedEnd { rank, time, line } => write!(
                f,
                "line {}: end at {} on rank {} has no open interval",
                line,
                rankscope_types::format_timestamp(*time),
                rank
            ),
            Error::UnmatchedBegin { rank, name, line } => write!(
                f,
                "line {}: interval '{}' on rank {} is never closed",
                line, name, rank
            ),
            Error::MismatchedEnd {
                rank,
                expected,
                found,
                line,
            } => write!(
                f,
                "line {}: end of '{}' on rank {} while '{}' is open",
                line, found, rank, expected
            ),
            Error::OutOfOrder {
                rank,
                time,
                previous,
                line,
            } => write!(
                f,
                "line {}: time {} on rank {} is before the previous event at {}",
                line,
                rankscope_types::format_timestamp(*time),
                rank,
                rankscope_types::format_timestamp(*previous)
            ),
            Error::RankOutOfRange { rank, line } => write!(
                f,
                "line {}: rank {} exceeds the maximum of {}",
                line,
                rank,
                rankscope_types::MAX_RANK
            ),
            Error::MalformedColor { line, raw } => {
                write!(f, "line {}: expected 'name r g b': {}", line, raw)
            }
        }
    }
}

impl std::error::Error for Error {}
