use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the SDK.
///
/// Every error caused by trace content names the 1-based line and its raw text.
#[derive(Debug)]
pub enum Error {
    /// Reading or decoding the input failed
    Provider(rankscope_providers::Error),

    /// Records did not nest; `raw` is the offending source line when known
    Structure {
        error: rankscope_engine::Error,
        raw: Option<String>,
    },

    /// Name or id lookup failed
    Lookup(rankscope_types::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),
}

impl Error {
    /// Attach the raw text of the line a structural error points at
    pub(crate) fn structure(error: rankscope_engine::Error, text: &str) -> Self {
        let raw = error
            .line()
            .checked_sub(1)
            .and_then(|index| text.lines().nth(index))
            .map(str::to_string);
        Error::Structure { error, raw }
    }

    /// Source line the error refers to, when it refers to one
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Provider(err) => err.line(),
            Error::Structure { error, .. } => Some(error.line()),
            Error::Lookup(_) | Error::Io(_) | Error::Config(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Provider(err) => write!(f, "{}", err),
            Error::Structure {
                error,
                raw: Some(raw),
            } => write!(f, "{}: {}", error, raw),
            Error::Structure { error, raw: None } => write!(f, "{}", error),
            Error::Lookup(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Provider(err) => Some(err),
            Error::Structure { error, .. } => Some(error),
            Error::Lookup(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<rankscope_providers::Error> for Error {
    fn from(err: rankscope_providers::Error) -> Self {
        Error::Provider(err)
    }
}

impl From<rankscope_engine::Error> for Error {
    fn from(error: rankscope_engine::Error) -> Self {
        Error::Structure { error, raw: None }
    }
}

impl From<rankscope_types::Error> for Error {
    fn from(err: rankscope_types::Error) -> Self {
        Error::Lookup(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
