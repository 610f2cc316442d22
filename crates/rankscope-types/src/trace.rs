use crate::{EventId, Interval, NameTable, Rank, Result, Timestamp};
use serde::{Deserialize, Serialize};

/// Summary values computed while the forests are built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStats {
    /// Deepest nesting level observed on any rank (roots are level 0)
    pub max_depth: usize,
    /// Earliest timestamp in the input (0 for an empty trace)
    pub min_time: Timestamp,
    /// Latest timestamp in the input (0 for an empty trace)
    pub max_time: Timestamp,
    /// Total number of intervals across all ranks
    pub intervals: usize,
}

/// Per-rank interval forests plus the name table they reference.
///
/// Built once by the engine and read-only afterwards; rendering and lookup
/// code borrow from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    forests: Vec<Vec<Interval>>,
    names: NameTable,
    stats: TraceStats,
}

impl Trace {
    pub fn new(forests: Vec<Vec<Interval>>, names: NameTable, stats: TraceStats) -> Self {
        Self {
            forests,
            names,
            stats,
        }
    }

    /// Number of ranks; rank indices are dense in `0..ranks()`
    pub fn ranks(&self) -> usize {
        self.forests.len()
    }

    pub fn forest(&self, rank: Rank) -> Option<&[Interval]> {
        self.forests.get(rank).map(Vec::as_slice)
    }

    pub fn forests(&self) -> &[Vec<Interval>] {
        &self.forests
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Name of an id taken from this trace's intervals.
    ///
    /// Panics on an id from another trace; use [`Trace::lookup_name`] for ids
    /// that did not come from this trace.
    pub fn name(&self, id: EventId) -> &str {
        self.names.name(id)
    }

    pub fn lookup_name(&self, id: EventId) -> Result<&str> {
        self.names.lookup_name(id)
    }

    pub fn id(&self, name: &str) -> Result<EventId> {
        self.names.lookup_id(name)
    }

    pub fn stats(&self) -> TraceStats {
        self.stats
    }

    pub fn max_depth(&self) -> usize {
        self.stats.max_depth
    }

    pub fn min_time(&self) -> Timestamp {
        self.stats.min_time
    }

    pub fn max_time(&self) -> Timestamp {
        self.stats.max_time
    }

    /// Length of the covered time range
    pub fn span(&self) -> Timestamp {
        self.stats.max_time.saturating_sub(self.stats.min_time)
    }

    pub fn interval_count(&self) -> usize {
        self.stats.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.stats.intervals == 0
    }

    /// Visit every interval as `(rank, interval, depth)`, rank by rank, depth-first
    pub fn walk<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(Rank, &'a Interval, usize),
    {
        for (rank, forest) in self.forests.iter().enumerate() {
            for root in forest {
                root.walk(0, &mut |interval, depth| visit(rank, interval, depth));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mut names = NameTable::new();
        let a = names.intern("a");
        let forests = vec![
            vec![Interval::open(a, 5)],
            Vec::new(),
            vec![Interval {
                id: a,
                begin: 2,
                end: 9,
                children: vec![Interval::open(a, 3)],
            }],
        ];
        let stats = TraceStats {
            max_depth: 1,
            min_time: 2,
            max_time: 9,
            intervals: 3,
        };
        let trace = Trace::new(forests, names, stats);

        assert_eq!(trace.ranks(), 3);
        assert_eq!(trace.forest(1).map(<[Interval]>::len), Some(0));
        assert!(trace.forest(3).is_none());
        assert_eq!(trace.span(), 7);
        assert_eq!(trace.id("a"), Ok(a));
        assert!(trace.id("b").is_err());
        assert_eq!(trace.lookup_name(a), Ok("a"));
        assert_eq!(
            trace.lookup_name(EventId::new(7)),
            Err(crate::Error::UnknownId { id: 7 })
        );

        let mut visited = Vec::new();
        trace.walk(|rank, interval, depth| visited.push((rank, interval.begin, depth)));
        assert_eq!(visited, vec![(0, 5, 0), (2, 2, 0), (2, 3, 1)]);
    }
}
