use std::fmt;

/// Result type for rankscope-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading a trace file.
///
/// Every content error names the 1-based line it was found on and the raw
/// text of that line.
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Timestamp field did not match `H:MM:SS.ffffff`
    MalformedTimestamp {
        line: usize,
        raw: String,
        stamp: String,
    },

    /// Required column absent from the header (or key absent from a key=value row)
    MissingColumn {
        column: String,
        line: usize,
        raw: String,
    },

    /// Wrong field count or a field of the wrong type
    MalformedRow {
        line: usize,
        raw: String,
        reason: String,
    },

    /// Format name not recognized
    UnknownFormat(String),
}

impl Error {
    /// Source line the error refers to, when it refers to one
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedTimestamp { line, .. }
            | Error::MissingColumn { line, .. }
            | Error::MalformedRow { line, .. } => Some(*line),
            Error::Io(_) | Error::UnknownFormat(_) => None,
        }
    }

    pub(crate) fn malformed_row(line: usize, raw: &str, reason: impl Into<String>) -> Self {
        Error::MalformedRow {
            line,
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::MalformedTimestamp { line, raw, stamp } => write!(
                f,
                "line {}: malformed timestamp '{}' (expected H:MM:SS.ffffff): {}",
                line, stamp, raw
            ),
            Error::MissingColumn { column, line, raw } => {
                write!(f, "line {}: missing column '{}': {}", line, column, raw)
            }
            Error::MalformedRow { line, raw, reason } => {
                write!(f, "line {}: malformed row ({}): {}", line, reason, raw)
            }
            Error::UnknownFormat(name) => write!(f, "Unknown trace format: {}", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::MalformedTimestamp { .. }
            | Error::MissingColumn { .. }
            | Error::MalformedRow { .. }
            | Error::UnknownFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
