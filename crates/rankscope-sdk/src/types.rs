//! Type re-exports for the SDK.
//!
//! The CLI and other consumers work with these instead of reaching into the
//! internal crates directly.

// Trace model (from rankscope-types)
pub use rankscope_types::{
    EventId, Interval, NameTable, Rank, Timestamp, Trace, TraceStats, format_timestamp,
    parse_timestamp,
};

// Reader configuration (from rankscope-providers)
pub use rankscope_providers::{AnnotationOptions, ColumnSplit, TraceFormat};

// Analysis results (from rankscope-engine)
pub use rankscope_engine::{
    Color, Hit, HitQuery, NameSummary, Palette, RankSegment, SegmentStats, Violation,
    ViolationKind,
};
