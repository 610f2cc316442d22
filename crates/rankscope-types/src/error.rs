use std::fmt;

/// Result type for rankscope-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Timestamp did not match `H:MM:SS.ffffff`
    MalformedTimestamp { stamp: String },

    /// Name was never interned into the table
    UnknownName { name: String },

    /// Id is outside the dense `[0, count)` range of the table
    UnknownId { id: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedTimestamp { stamp } => {
                write!(f, "malformed timestamp '{}' (expected H:MM:SS.ffffff)", stamp)
            }
            Error::UnknownName { name } => write!(f, "unknown event name '{}'", name),
            Error::UnknownId { id } => write!(f, "unknown event id {}", id),
        }
    }
}

impl std::error::Error for Error {}
