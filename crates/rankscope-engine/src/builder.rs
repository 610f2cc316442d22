use crate::{Error, Result};
use rankscope_types::{
    EventId, EventKind, EventRecord, EventStream, Interval, MAX_RANK, NameTable, Rank, Timestamp,
    Trace, TraceStats,
};

/// An interval that has been opened but not closed yet
#[derive(Debug)]
struct OpenInterval {
    interval: Interval,
    line: usize,
}

/// Per-rank state while records are consumed
#[derive(Debug, Default)]
struct RankState {
    roots: Vec<Interval>,
    stack: Vec<OpenInterval>,
    /// Time of the latest record consumed on this rank
    last: Timestamp,
}

/// Reconstructs nested interval forests from an ordered record stream.
///
/// Each rank keeps its own stack of open intervals. A begin opens an interval
/// under the innermost open one; an end closes the innermost open one and
/// hands it to its parent (or to the rank's roots).
///
/// Records of one rank must be non-decreasing in time; that alone keeps every
/// interval inside its parent and after its previous sibling.
pub struct IntervalBuilder<'n> {
    names: &'n NameTable,
    ranks: Vec<RankState>,
    max_depth: usize,
    intervals: usize,
}

impl<'n> IntervalBuilder<'n> {
    pub fn new(names: &'n NameTable) -> Self {
        Self {
            names,
            ranks: Vec::new(),
            max_depth: 0,
            intervals: 0,
        }
    }

    fn rank_mut(&mut self, record: &EventRecord) -> Result<&mut RankState> {
        let rank = record.rank;
        if rank > MAX_RANK {
            return Err(Error::RankOutOfRange {
                rank,
                line: record.line,
            });
        }
        if rank >= self.ranks.len() {
            self.ranks.resize_with(rank + 1, RankState::default);
        }

        let state = &mut self.ranks[rank];
        if record.time < state.last {
            return Err(Error::OutOfOrder {
                rank,
                time: record.time,
                previous: state.last,
                line: record.line,
            });
        }
        state.last = record.time;
        Ok(state)
    }

    pub fn push(&mut self, record: &EventRecord) -> Result<()> {
        match record.kind {
            EventKind::Begin(id) => {
                self.rank_mut(record)?.stack.push(OpenInterval {
                    interval: Interval::open(id, record.time),
                    line: record.line,
                });
                Ok(())
            }
            EventKind::End(named) => self.close(record, named),
        }
    }

    fn close(&mut self, record: &EventRecord, named: Option<EventId>) -> Result<()> {
        let names = self.names;
        let state = self.rank_mut(record)?;

        let Some(OpenInterval { mut interval, .. }) = state.stack.pop() else {
            return Err(Error::UnmatchedEnd {
                rank: record.rank,
                time: record.time,
                line: record.line,
            });
        };
        if let Some(found) = named
            && found != interval.id
        {
            return Err(Error::MismatchedEnd {
                rank: record.rank,
                expected: names.name(interval.id).to_string(),
                found: names.name(found).to_string(),
                line: record.line,
            });
        }

        // Level of the interval being closed; roots are level 0.
        let level = state.stack.len();
        interval.end = record.time;

        match state.stack.last_mut() {
            Some(parent) => parent.interval.children.push(interval),
            None => state.roots.push(interval),
        }

        self.max_depth = self.max_depth.max(level);
        self.intervals += 1;
        Ok(())
    }

    /// Finish building. Fails if any rank still has an open interval.
    pub fn finish(
        self,
        bounds: Option<(Timestamp, Timestamp)>,
    ) -> Result<(Vec<Vec<Interval>>, TraceStats)> {
        for (rank, state) in self.ranks.iter().enumerate() {
            if let Some(open) = state.stack.last() {
                return Err(Error::UnmatchedBegin {
                    rank,
                    name: self.names.name(open.interval.id).to_string(),
                    line: open.line,
                });
            }
        }

        let (min_time, max_time) = bounds.unwrap_or((0, 0));
        let stats = TraceStats {
            max_depth: self.max_depth,
            min_time,
            max_time,
            intervals: self.intervals,
        };
        let forests = self.ranks.into_iter().map(|state| state.roots).collect();
        Ok((forests, stats))
    }
}

/// Build a trace from a reader's record stream
pub fn build(stream: EventStream) -> Result<Trace> {
    let bounds = stream.bounds();
    let EventStream { records, names, .. } = stream;

    let mut builder = IntervalBuilder::new(&names);
    for record in &records {
        builder.push(record)?;
    }
    let (forests, stats) = builder.finish(bounds)?;

    tracing::debug!(
        ranks = forests.len(),
        intervals = stats.intervals,
        max_depth = stats.max_depth,
        "built interval forests"
    );

    Ok(Trace::new(forests, names, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankscope_providers::parse_simple;

    fn build_simple(text: &str) -> Result<Trace> {
        build(parse_simple(text).expect("simple text should parse"))
    }

    #[test]
    fn test_nested_pair() {
        let trace = build_simple(
            "0 00:00:00.000000 <a\n0 00:00:01.000000 <b\n0 00:00:02.000000 >b\n0 00:00:03.000000 >a\n",
        )
        .unwrap();

        let forest = trace.forest(0).unwrap();
        assert_eq!(forest.len(), 1);
        let a = &forest[0];
        assert_eq!(trace.name(a.id), "a");
        assert_eq!((a.begin, a.end), (0, 3_000_000));
        assert_eq!(a.children.len(), 1);
        let b = &a.children[0];
        assert_eq!(trace.name(b.id), "b");
        assert_eq!((b.begin, b.end), (1_000_000, 2_000_000));
        assert!(b.children.is_empty());

        assert_eq!(trace.max_depth(), 1);
        assert_eq!(trace.min_time(), 0);
        assert_eq!(trace.max_time(), 3_000_000);
        assert_eq!(trace.interval_count(), 2);
    }

    #[test]
    fn test_single_level_has_depth_zero() {
        let trace = build_simple("0 0:00:00.000005 <a\n0 0:00:00.000007 >a\n").unwrap();
        assert_eq!(trace.max_depth(), 0);
        assert_eq!(trace.min_time(), 5);
    }

    #[test]
    fn test_siblings_and_multiple_roots() {
        let trace = build_simple(
            "\
1 0:00:00.000001 <a
1 0:00:00.000002 <b
1 0:00:00.000003 >b
1 0:00:00.000004 <c
1 0:00:00.000005 >c
1 0:00:00.000006 >a
1 0:00:00.000007 <d
1 0:00:00.000008 >d
",
        )
        .unwrap();

        assert_eq!(trace.ranks(), 2);
        assert_eq!(trace.forest(0).map(<[Interval]>::len), Some(0));
        let forest = trace.forest(1).unwrap();
        let roots: Vec<&str> = forest.iter().map(|i| trace.name(i.id)).collect();
        assert_eq!(roots, vec!["a", "d"]);
        let children: Vec<(u64, u64)> =
            forest[0].children.iter().map(|i| (i.begin, i.end)).collect();
        assert_eq!(children, vec![(2, 3), (4, 5)]);
    }

    #[test]
    fn test_ranks_interleave_independently() {
        let trace = build_simple(
            "\
0 0:00:00.000000 <a
1 0:00:00.000001 <a
0 0:00:00.000002 >a
1 0:00:00.000003 >a
",
        )
        .unwrap();
        assert_eq!(trace.forest(0).unwrap()[0].end, 2);
        assert_eq!(trace.forest(1).unwrap()[0].end, 3);
    }

    #[test]
    fn test_unmatched_end() {
        let err = build_simple("0 0:00:00.000000 <a\n0 0:00:00.000001 >a\n2 0:00:00.000002 >a\n")
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnmatchedEnd {
                rank: 2,
                time: 2,
                line: 3
            }
        );
    }

    #[test]
    fn test_unmatched_begin_reports_innermost() {
        let err = build_simple("0 0:00:00.000000 <a\n0 0:00:00.000001 <b\n0 0:00:00.000002 >b\n0 0:00:00.000003 <c\n")
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnmatchedBegin {
                rank: 0,
                name: "c".to_string(),
                line: 4
            }
        );
    }

    #[test]
    fn test_mismatched_named_end() {
        let mut names = NameTable::new();
        let a = names.intern("a");
        let b = names.intern("b");
        let mut stream = EventStream::new();
        stream.names = names;
        stream.push(EventRecord::begin(0, 0, a, 1));
        stream.push(EventRecord::begin(0, 1, b, 2));
        stream.push(EventRecord::end(0, 2, Some(a), 3));

        let err = build(stream).unwrap_err();
        assert_eq!(
            err,
            Error::MismatchedEnd {
                rank: 0,
                expected: "b".to_string(),
                found: "a".to_string(),
                line: 3
            }
        );
    }

    #[test]
    fn test_end_before_begin_is_rejected() {
        let err = build_simple("0 0:00:00.000005 <a\n0 0:00:00.000003 >a\n").unwrap_err();
        assert_eq!(
            err,
            Error::OutOfOrder {
                rank: 0,
                time: 3,
                previous: 5,
                line: 2
            }
        );
    }

    #[test]
    fn test_child_before_parent_is_rejected() {
        let err = build_simple(
            "\
0 0:00:00.000010 <a
0 0:00:00.000002 <b
0 0:00:00.000004 >b
0 0:00:00.000020 >a
",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfOrder {
                rank: 0,
                time: 2,
                previous: 10,
                line: 2
            }
        ));
    }

    #[test]
    fn test_sibling_before_previous_sibling_end_is_rejected() {
        let err = build_simple(
            "\
0 0:00:00.000000 <a
0 0:00:00.000001 <b
0 0:00:00.000005 >b
0 0:00:00.000003 <c
",
        )
        .unwrap_err();
        assert_eq!(err.line(), 4);
        assert!(err.to_string().starts_with(
            "line 4: time 00:00:00.000003 on rank 0 is before the previous event at 00:00:00.000005"
        ));
    }

    #[test]
    fn test_order_is_checked_per_rank() {
        let trace = build_simple(
            "\
0 0:00:00.000010 <a
1 0:00:00.000001 <a
1 0:00:00.000002 >a
0 0:00:00.000011 >a
",
        )
        .unwrap();
        assert_eq!(trace.forest(1).unwrap()[0].begin, 1);
    }

    #[test]
    fn test_rank_above_limit_is_rejected() {
        let mut names = NameTable::new();
        let a = names.intern("a");
        let mut stream = EventStream::new();
        stream.names = names;
        stream.push(EventRecord::begin(Rank::MAX, 0, a, 1));

        assert_eq!(
            build(stream).unwrap_err(),
            Error::RankOutOfRange {
                rank: Rank::MAX,
                line: 1
            }
        );
    }

    #[test]
    fn test_empty_stream() {
        let trace = build(EventStream::new()).unwrap();
        assert_eq!(trace.ranks(), 0);
        assert!(trace.is_empty());
        assert_eq!(trace.stats(), TraceStats::default());
    }

    #[test]
    fn test_zero_length_interval() {
        let trace = build_simple("0 0:00:00.000004 <a\n0 0:00:00.000004 >a\n").unwrap();
        let a = &trace.forest(0).unwrap()[0];
        assert_eq!((a.begin, a.end, a.duration()), (4, 4, 0));
    }
}
