//! Seeded random traces that are well nested by construction.
//!
//! The same generated forest is rendered in both input formats, so tests can
//! check that the readers agree with each other.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rankscope_types::{Timestamp, format_timestamp};

const NAMES: &[&str] = &[
    "main", "solve", "exchange", "reduce", "smooth", "pack", "unpack", "io",
];

/// Shape limits for generated traces
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub ranks: usize,
    pub max_roots: usize,
    pub max_depth: usize,
    pub max_children: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            ranks: 3,
            max_roots: 3,
            max_depth: 4,
            max_children: 3,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: &'static str,
    begin: Timestamp,
    end: Timestamp,
    children: Vec<Node>,
}

/// A generated trace with the values a correct build must reproduce
#[derive(Debug, Clone)]
pub struct GeneratedTrace {
    /// Simple line format, ranks interleaved by time
    pub simple: String,
    /// Whitespace annotation table, rows in completion order
    pub annotation: String,
    pub ranks: usize,
    pub intervals: usize,
    pub max_depth: usize,
    pub min_time: Timestamp,
    pub max_time: Timestamp,
}

/// Generate a trace from `seed`
pub fn generate(seed: u64, options: GenerateOptions) -> GeneratedTrace {
    generate_with(&mut StdRng::seed_from_u64(seed), options)
}

/// Generate a trace from any random source.
///
/// Every child starts strictly after its parent and ends strictly before it,
/// and every interval lasts at least 1us, so no two intervals share a window.
pub fn generate_with<R: Rng>(rng: &mut R, options: GenerateOptions) -> GeneratedTrace {
    let mut forests: Vec<Vec<Node>> = Vec::with_capacity(options.ranks);
    for _ in 0..options.ranks {
        let mut forest = Vec::new();
        let mut cursor: Timestamp = rng.random_range(0..=10);
        for _ in 0..rng.random_range(1..=options.max_roots.max(1)) {
            let root = span(rng, 0, cursor, &options);
            cursor = root.end + rng.random_range(0..=10);
            forest.push(root);
        }
        forests.push(forest);
    }

    let mut events = Vec::new();
    let mut rows = Vec::new();
    let mut intervals = 0;
    let mut max_depth = 0;
    for (rank, forest) in forests.iter().enumerate() {
        for root in forest {
            emit(rank, root, "", &mut events, &mut rows);
            count(root, 0, &mut intervals, &mut max_depth);
        }
    }

    // Sequence numbers keep each rank's depth-first order at equal times.
    events.sort_by_key(|&(time, rank, seq, _)| (time, rank, seq));
    let simple: String = events
        .iter()
        .map(|(time, rank, _, token)| format!("{} {} {}\n", rank, format_timestamp(*time), token))
        .collect();

    let mut annotation = String::from("mpi.rank time.offset time.inclusive.duration annotation\n");
    for (rank, end, duration, path) in &rows {
        annotation.push_str(&format!("{} {} {} {}\n", rank, end, duration, path));
    }

    let min_time = events.first().map_or(0, |e| e.0);
    let max_time = events.last().map_or(0, |e| e.0);

    GeneratedTrace {
        simple,
        annotation,
        ranks: options.ranks,
        intervals,
        max_depth,
        min_time,
        max_time,
    }
}

fn span<R: Rng>(rng: &mut R, depth: usize, begin: Timestamp, options: &GenerateOptions) -> Node {
    let name = NAMES[rng.random_range(0..NAMES.len())];
    let mut cursor = begin + rng.random_range(1..=5);
    let mut children = Vec::new();

    if depth < options.max_depth {
        for _ in 0..rng.random_range(0..=options.max_children) {
            let child = span(rng, depth + 1, cursor, options);
            cursor = child.end + rng.random_range(0..=5);
            children.push(child);
        }
    }

    Node {
        name,
        begin,
        end: cursor + rng.random_range(1..=5),
        children,
    }
}

type Event = (Timestamp, usize, usize, String);
type Row = (usize, Timestamp, Timestamp, String);

fn emit(
    rank: usize,
    node: &Node,
    parent_path: &str,
    events: &mut Vec<Event>,
    rows: &mut Vec<Row>,
) {
    let path = if parent_path.is_empty() {
        node.name.to_string()
    } else {
        format!("{}/{}", parent_path, node.name)
    };

    events.push((node.begin, rank, events.len(), format!("<{}", node.name)));
    for child in &node.children {
        emit(rank, child, &path, events, rows);
    }
    events.push((node.end, rank, events.len(), format!(">{}", node.name)));
    rows.push((rank, node.end, node.end - node.begin, path));
}

fn count(node: &Node, depth: usize, intervals: &mut usize, max_depth: &mut usize) {
    *intervals += 1;
    *max_depth = (*max_depth).max(depth);
    for child in &node.children {
        count(child, depth + 1, intervals, max_depth);
    }
}
