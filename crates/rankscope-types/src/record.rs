use crate::{EventId, Timestamp};
use serde::{Deserialize, Serialize};

/// Index of an execution stream (one process of a distributed run)
pub type Rank = usize;

/// Highest rank index a trace may use. Forests are dense up to the highest
/// rank seen, so readers reject anything larger.
pub const MAX_RANK: Rank = (1 << 20) - 1;

/// Whether a record opens or closes an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EventKind {
    Begin(EventId),
    /// Closes the innermost open interval on the rank. When the source names
    /// the interval being closed, the builder checks it against the open one.
    End(Option<EventId>),
}

/// One begin or end tuple fed to the interval builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub rank: Rank,
    pub time: Timestamp,
    pub kind: EventKind,
    /// 1-based source line the record came from
    pub line: usize,
}

impl EventRecord {
    pub fn begin(rank: Rank, time: Timestamp, id: EventId, line: usize) -> Self {
        Self {
            rank,
            time,
            kind: EventKind::Begin(id),
            line,
        }
    }

    pub fn end(rank: Rank, time: Timestamp, id: Option<EventId>, line: usize) -> Self {
        Self {
            rank,
            time,
            kind: EventKind::End(id),
            line,
        }
    }

    pub fn is_begin(&self) -> bool {
        matches!(self.kind, EventKind::Begin(_))
    }
}
