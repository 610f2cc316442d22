use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How header and row fields are separated in tabular annotation traces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSplit {
    /// Runs of whitespace separate fields; every row must fill every column
    #[default]
    Whitespace,
    /// Comma-separated fields, surrounding whitespace trimmed
    Comma,
    /// Fixed-width table: each column starts where its header name starts
    Aligned,
}

impl fmt::Display for ColumnSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSplit::Whitespace => write!(f, "whitespace"),
            ColumnSplit::Comma => write!(f, "comma"),
            ColumnSplit::Aligned => write!(f, "aligned"),
        }
    }
}

impl FromStr for ColumnSplit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "whitespace" | "space" | "ws" => Ok(ColumnSplit::Whitespace),
            "comma" | "csv" => Ok(ColumnSplit::Comma),
            "aligned" | "fixed" => Ok(ColumnSplit::Aligned),
            _ => Err(Error::UnknownFormat(format!("column split '{}'", s))),
        }
    }
}

/// Options for reading annotation traces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationOptions {
    pub split: ColumnSplit,
    /// Treat MPI function regions (`event.end#mpi.function`, `mpi.function`)
    /// as events alongside annotations
    pub include_mpi_function_names: bool,
}

impl AnnotationOptions {
    pub fn with_split(mut self, split: ColumnSplit) -> Self {
        self.split = split;
        self
    }

    pub fn with_mpi_function_names(mut self, include: bool) -> Self {
        self.include_mpi_function_names = include;
        self
    }
}
