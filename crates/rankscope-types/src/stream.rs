use crate::{EventRecord, NameTable, Timestamp};

/// Records produced by a format reader, in the order the builder must consume them.
#[derive(Debug, Clone, Default)]
pub struct EventStream {
    pub records: Vec<EventRecord>,
    pub names: NameTable,
    bounds: Option<(Timestamp, Timestamp)>,
}

impl EventStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and widen the observed time bounds
    pub fn push(&mut self, record: EventRecord) {
        self.observe(record.time);
        self.records.push(record);
    }

    /// Widen the time bounds without adding a record
    pub fn observe(&mut self, time: Timestamp) {
        self.bounds = Some(match self.bounds {
            Some((lo, hi)) => (lo.min(time), hi.max(time)),
            None => (time, time),
        });
    }

    /// `(min, max)` over every timestamp seen, `None` when nothing was read
    pub fn bounds(&self) -> Option<(Timestamp, Timestamp)> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventId;

    #[test]
    fn test_push_tracks_bounds() {
        let mut stream = EventStream::new();
        assert_eq!(stream.bounds(), None);

        let id = EventId::new(0);
        stream.push(EventRecord::begin(0, 40, id, 1));
        stream.push(EventRecord::begin(1, 10, id, 2));
        stream.push(EventRecord::end(0, 90, None, 3));

        assert_eq!(stream.bounds(), Some((10, 90)));
        assert_eq!(stream.len(), 3);
    }
}
