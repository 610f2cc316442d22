//! Columnar annotation traces (one row per completed region).
//!
//! Column discovery: the first non-empty line is either a header or, when
//! every field of it is a `key=value` pair, the first self-describing row.
//! Header names are split according to [`ColumnSplit`]: whitespace tokens by
//! default, commas when configured, or character offsets for aligned tables
//! whose cells may be blank. Fields are then located by name, never by
//! position, so column order is free.
//!
//! Each row yields a begin record at `time.offset - time.inclusive.duration`
//! and an end record at `time.offset`. Rows arrive in completion order, so the
//! records are sorted per rank before they reach the builder.

pub mod layout;
pub mod options;
pub mod parser;

pub use self::layout::{ColumnLayout, RowFields};
pub use self::options::{AnnotationOptions, ColumnSplit};
pub use self::parser::{AnnotationReader, Window, leaf_name, parse_annotation, sort_records};

pub(crate) const OFFSET: &str = "time.offset";
pub(crate) const DURATION: &str = "time.inclusive.duration";
pub(crate) const ANNOTATION: &str = "annotation";
pub(crate) const END_ANNOTATION: &str = "event.end#annotation";
pub(crate) const MPI_FUNCTION: &str = "mpi.function";
pub(crate) const END_MPI_FUNCTION: &str = "event.end#mpi.function";
pub(crate) const RANK: &str = "mpi.rank";
pub(crate) const END_EVENT_PREFIX: &str = "event.end#";
