use rankscope_types::{EventId, Interval, Rank, Timestamp, Trace};
use std::collections::HashSet;

/// What to look for in a hit-test
#[derive(Debug, Clone)]
pub struct HitQuery {
    pub rank: Rank,
    pub time: Timestamp,
    /// Deepest level searched; roots are level 0
    pub max_depth: usize,
    /// Intervals shorter than this are skipped over (0 keeps everything)
    pub min_duration: Timestamp,
    /// Names never returned; their children are still searched
    pub hidden: HashSet<EventId>,
}

impl HitQuery {
    pub fn new(rank: Rank, time: Timestamp) -> Self {
        Self {
            rank,
            time,
            max_depth: usize::MAX,
            min_duration: 0,
            hidden: HashSet::new(),
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_min_duration(mut self, duration: Timestamp) -> Self {
        self.min_duration = duration;
        self
    }

    pub fn with_hidden(mut self, hidden: impl IntoIterator<Item = EventId>) -> Self {
        self.hidden.extend(hidden);
        self
    }

    fn is_transparent(&self, interval: &Interval) -> bool {
        interval.duration() < self.min_duration || self.hidden.contains(&interval.id)
    }
}

/// A located interval and its nesting level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit<'t> {
    pub rank: Rank,
    pub depth: usize,
    pub interval: &'t Interval,
}

/// Find the deepest visible interval containing `query.time` on `query.rank`.
///
/// Bounds are inclusive, so a time on a boundary shared by two touching
/// siblings hits the earlier one.
pub fn locate<'t>(trace: &'t Trace, query: &HitQuery) -> Option<Hit<'t>> {
    let forest = trace.forest(query.rank)?;
    let (interval, depth) = search(forest, 0, query)?;
    Some(Hit {
        rank: query.rank,
        depth,
        interval,
    })
}

fn search<'t>(
    siblings: &'t [Interval],
    depth: usize,
    query: &HitQuery,
) -> Option<(&'t Interval, usize)> {
    if depth > query.max_depth {
        return None;
    }

    // Siblings are ordered and disjoint, so their ends are sorted too.
    let first = siblings.partition_point(|interval| interval.end < query.time);
    for interval in siblings[first..]
        .iter()
        .take_while(|interval| interval.begin <= query.time)
    {
        if let Some(deeper) = search(&interval.children, depth + 1, query) {
            return Some(deeper);
        }
        if !query.is_transparent(interval) {
            return Some((interval, depth));
        }
    }
    None
}
