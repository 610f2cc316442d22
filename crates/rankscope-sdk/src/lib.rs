//! rankscope-sdk: load distributed execution traces as per-rank interval forests.
//!
//! # Overview
//!
//! A trace is a set of timed begin/end events from many ranks (processes of a
//! distributed run). This crate reads such a trace from disk, reconstructs the
//! nested intervals of every rank and offers the queries a timeline viewer
//! needs: name lookup, per-rank forests, depth and time bounds, hit-testing,
//! per-name statistics and a color palette.
//!
//! # Quickstart
//!
//! ```no_run
//! use rankscope_sdk::{LoadOptions, load_trace};
//! use rankscope_sdk::types::HitQuery;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = load_trace("run.prf", &LoadOptions::default())?;
//! let trace = &loaded.trace;
//! println!("{} ranks, max depth {}", trace.ranks(), trace.max_depth());
//!
//! if let Some(hit) = rankscope_sdk::hit_test(trace, &HitQuery::new(0, 1_500_000)) {
//!     println!("rank 0 is in {}", trace.name(hit.interval.id));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! This SDK acts as a facade over:
//! - `rankscope-types`: trace model, timestamps, name table
//! - `rankscope-providers`: readers for the simple and annotation formats
//! - `rankscope-engine`: interval builder, lookup, statistics, validation, palette

pub mod config;
pub mod error;
pub mod loader;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use loader::{
    LoadOptions, LoadedTrace, build_trace_from_annotation, build_trace_from_simple,
    build_trace_from_str, load_trace, read_trace_text,
};

use rand::SeedableRng;
use rand::rngs::StdRng;
use types::{EventId, Hit, HitQuery, NameSummary, Palette, SegmentStats, Trace, Violation};

/// Deepest visible interval under a point, if any
pub fn hit_test<'t>(trace: &'t Trace, query: &HitQuery) -> Option<Hit<'t>> {
    rankscope_engine::hit_test(trace, query)
}

/// Ids of the given names; names absent from the trace are skipped
pub fn resolve_names<'a>(
    trace: &Trace,
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<EventId> {
    names
        .into_iter()
        .filter_map(|name| match trace.id(name) {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::debug!(name, "name not present in trace");
                None
            }
        })
        .collect()
}

/// Per-rank statistics for one interval name
pub fn segment_stats(trace: &Trace, name: &str) -> Result<SegmentStats> {
    Ok(rankscope_engine::segment_stats(trace, name)?)
}

pub fn name_summary(trace: &Trace) -> Vec<NameSummary> {
    rankscope_engine::name_summary(trace)
}

pub fn validate(trace: &Trace) -> Vec<Violation> {
    rankscope_engine::validate(trace)
}

/// Palette for the trace's names: the distinct table, or random colors.
///
/// A seed makes the random palette reproducible; without one it is drawn
/// from system entropy.
pub fn palette(trace: &Trace, random: bool, seed: Option<u64>) -> Palette {
    if !random {
        return Palette::distinct(trace.names());
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Palette::random(trace.names(), &mut rng)
}
