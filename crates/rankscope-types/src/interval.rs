use crate::{EventId, Timestamp};
use serde::{Deserialize, Serialize};

/// A named time span owning the spans nested inside it.
///
/// Children are contained in `[begin, end]`, ordered by `begin` and never
/// overlap each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub id: EventId,
    pub begin: Timestamp,
    pub end: Timestamp,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Interval>,
}

impl Interval {
    /// An interval opened at `time` that has not been closed yet
    pub fn open(id: EventId, time: Timestamp) -> Self {
        Self {
            id,
            begin: time,
            end: time,
            children: Vec::new(),
        }
    }

    pub fn duration(&self) -> Timestamp {
        self.end.saturating_sub(self.begin)
    }

    /// Inclusive on both bounds
    pub fn contains(&self, time: Timestamp) -> bool {
        self.begin <= time && time <= self.end
    }

    /// Number of intervals in this subtree, including `self`
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Interval::count).sum::<usize>()
    }

    /// Visit this subtree depth-first, parents before children.
    ///
    /// `depth` is the nesting level of `self`.
    pub fn walk<'a, F>(&'a self, depth: usize, visit: &mut F)
    where
        F: FnMut(&'a Interval, usize),
    {
        visit(self, depth);
        for child in &self.children {
            child.walk(depth + 1, visit);
        }
    }
}
