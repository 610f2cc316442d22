// Engine module - interval reconstruction and analysis
// This layer sits between reader record streams (providers) and the CLI

pub mod builder;
pub mod error;
pub mod palette;
pub mod search;
pub mod stats;
pub mod validate;

pub use builder::{IntervalBuilder, build};
pub use error::{Error, Result};
pub use palette::{Color, Palette};
pub use search::{Hit, HitQuery, locate};
pub use stats::{NameSummary, RankSegment, SegmentStats, name_summary, segment_stats};
pub use validate::{Violation, ViolationKind, validate};

use rankscope_types::{EventStream, Trace};

// Façade API - Stable public interface for the SDK and CLI layers

/// Build per-rank interval forests from an ordered record stream
pub fn build_trace(stream: EventStream) -> Result<Trace> {
    build(stream)
}

/// Deepest visible interval under a point, if any
pub fn hit_test<'t>(trace: &'t Trace, query: &HitQuery) -> Option<Hit<'t>> {
    locate(trace, query)
}
