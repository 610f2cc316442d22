//! Testing infrastructure for rankscope integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TraceWorld`: isolated temp directory with trace files and a CLI runner
//! - `assertions`: structural checks on built traces
//! - `fixtures`: canonical sample traces
//! - `generate`: seeded random well-nested traces in both input formats

pub mod assertions;
pub mod fixtures;
pub mod generate;
pub mod world;

pub use world::{CliResult, TraceWorld};
