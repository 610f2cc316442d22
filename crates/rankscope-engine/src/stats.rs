use rankscope_types::{EventId, Rank, Result, Timestamp, Trace};
use serde::Serialize;

/// Occurrences of one name on one rank
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RankSegment {
    pub rank: Rank,
    pub count: usize,
    /// Sum of inclusive durations
    pub total: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentStats {
    pub id: EventId,
    pub name: String,
    /// One entry per rank, including ranks where the name never occurs
    pub ranks: Vec<RankSegment>,
    pub count: usize,
    pub total: Timestamp,
}

impl SegmentStats {
    /// Ranks on which the name occurs at least once
    pub fn active_ranks(&self) -> impl Iterator<Item = &RankSegment> {
        self.ranks.iter().filter(|segment| segment.count > 0)
    }

    /// Mean inclusive duration of one occurrence, 0 when there are none
    pub fn mean(&self) -> Timestamp {
        if self.count == 0 {
            0
        } else {
            self.total / self.count as Timestamp
        }
    }
}

/// Per-rank statistics for every interval named `name`.
///
/// Nested occurrences of the same name each count, so a recursive region's
/// total may exceed the wall time it covers.
pub fn segment_stats(trace: &Trace, name: &str) -> Result<SegmentStats> {
    let id = trace.id(name)?;
    let mut ranks: Vec<RankSegment> = (0..trace.ranks())
        .map(|rank| RankSegment {
            rank,
            ..RankSegment::default()
        })
        .collect();

    trace.walk(|rank, interval, _| {
        if interval.id == id {
            let segment = &mut ranks[rank];
            segment.count += 1;
            segment.total += interval.duration();
        }
    });

    Ok(SegmentStats {
        id,
        name: name.to_string(),
        count: ranks.iter().map(|s| s.count).sum(),
        total: ranks.iter().map(|s| s.total).sum(),
        ranks,
    })
}

/// Count and total time of one name across all ranks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameSummary {
    pub id: EventId,
    pub name: String,
    pub count: usize,
    pub total: Timestamp,
}

/// One entry per interned name, ordered by id
pub fn name_summary(trace: &Trace) -> Vec<NameSummary> {
    let mut summary: Vec<NameSummary> = trace
        .names()
        .iter()
        .map(|(id, name)| NameSummary {
            id,
            name: name.to_string(),
            count: 0,
            total: 0,
        })
        .collect();

    trace.walk(|_, interval, _| {
        let entry = &mut summary[interval.id.index()];
        entry.count += 1;
        entry.total += interval.duration();
    });

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;
    use rankscope_providers::parse_simple;

    fn trace() -> Trace {
        build(
            parse_simple(
                "\
0 0:00:00.000000 <main
0 0:00:00.000010 <io
0 0:00:00.000015 >io
0 0:00:00.000020 <io
0 0:00:00.000030 >io
0 0:00:00.000050 >main
2 0:00:00.000000 <io
2 0:00:00.000007 >io
",
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_segment_stats() {
        let stats = segment_stats(&trace(), "io").unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total, 22);
        assert_eq!(stats.mean(), 7);
        assert_eq!(
            stats.ranks,
            vec![
                RankSegment {
                    rank: 0,
                    count: 2,
                    total: 15
                },
                RankSegment {
                    rank: 1,
                    count: 0,
                    total: 0
                },
                RankSegment {
                    rank: 2,
                    count: 1,
                    total: 7
                },
            ]
        );
        let active: Vec<Rank> = stats.active_ranks().map(|s| s.rank).collect();
        assert_eq!(active, vec![0, 2]);
    }

    #[test]
    fn test_segment_stats_unknown_name() {
        assert!(segment_stats(&trace(), "compute").is_err());
    }

    #[test]
    fn test_name_summary() {
        let summary = name_summary(&trace());
        let rows: Vec<(&str, usize, Timestamp)> = summary
            .iter()
            .map(|s| (s.name.as_str(), s.count, s.total))
            .collect();
        assert_eq!(rows, vec![("main", 1, 50), ("io", 3, 22)]);
    }
}
