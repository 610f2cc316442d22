use rankscope_types::{Interval, Rank, Timestamp, Trace, format_timestamp};
use serde::Serialize;
use std::fmt;

/// Structural problem found in a built trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// `begin > end`
    Inverted,
    /// Not contained in the parent's bounds
    EscapesParent {
        parent_begin: Timestamp,
        parent_end: Timestamp,
    },
    /// Starts before the previous sibling ended
    OverlapsSibling { previous_end: Timestamp },
    /// Deeper than the trace's recorded maximum depth
    TooDeep { max_depth: usize },
    /// Outside the trace's recorded time bounds
    OutOfBounds { min_time: Timestamp, max_time: Timestamp },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rank: Rank,
    pub depth: usize,
    pub name: String,
    pub begin: Timestamp,
    pub end: Timestamp,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rank {} depth {} '{}' [{} - {}]: ",
            self.rank,
            self.depth,
            self.name,
            format_timestamp(self.begin),
            format_timestamp(self.end)
        )?;
        match &self.kind {
            ViolationKind::Inverted => write!(f, "ends before it begins"),
            ViolationKind::EscapesParent {
                parent_begin,
                parent_end,
            } => write!(
                f,
                "not contained in parent [{} - {}]",
                format_timestamp(*parent_begin),
                format_timestamp(*parent_end)
            ),
            ViolationKind::OverlapsSibling { previous_end } => write!(
                f,
                "overlaps previous sibling ending at {}",
                format_timestamp(*previous_end)
            ),
            ViolationKind::TooDeep { max_depth } => {
                write!(f, "deeper than recorded max depth {}", max_depth)
            }
            ViolationKind::OutOfBounds { min_time, max_time } => write!(
                f,
                "outside trace bounds [{} - {}]",
                format_timestamp(*min_time),
                format_timestamp(*max_time)
            ),
        }
    }
}

/// Check every interval against the nesting rules a built trace must satisfy.
///
/// An empty result means the trace is well formed.
pub fn validate(trace: &Trace) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (rank, forest) in trace.forests().iter().enumerate() {
        check_siblings(trace, rank, forest, None, 0, &mut violations);
    }
    violations
}

fn check_siblings(
    trace: &Trace,
    rank: Rank,
    siblings: &[Interval],
    parent: Option<&Interval>,
    depth: usize,
    out: &mut Vec<Violation>,
) {
    let stats = trace.stats();
    let mut previous_end: Option<Timestamp> = None;

    for interval in siblings {
        let mut report = |kind| {
            out.push(Violation {
                rank,
                depth,
                name: trace.name(interval.id).to_string(),
                begin: interval.begin,
                end: interval.end,
                kind,
            })
        };

        if interval.begin > interval.end {
            report(ViolationKind::Inverted);
        }
        if let Some(parent) = parent
            && (interval.begin < parent.begin || interval.end > parent.end)
        {
            report(ViolationKind::EscapesParent {
                parent_begin: parent.begin,
                parent_end: parent.end,
            });
        }
        if let Some(previous_end) = previous_end
            && interval.begin < previous_end
        {
            report(ViolationKind::OverlapsSibling { previous_end });
        }
        if depth > stats.max_depth {
            report(ViolationKind::TooDeep {
                max_depth: stats.max_depth,
            });
        }
        if interval.begin < stats.min_time || interval.end > stats.max_time {
            report(ViolationKind::OutOfBounds {
                min_time: stats.min_time,
                max_time: stats.max_time,
            });
        }

        previous_end = Some(interval.end);
        check_siblings(trace, rank, &interval.children, Some(interval), depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;
    use rankscope_providers::parse_simple;
    use rankscope_types::{NameTable, TraceStats};

    #[test]
    fn test_built_trace_is_valid() {
        let trace = build(
            parse_simple(
                "\
0 0:00:00.000000 <a
0 0:00:00.000001 <b
0 0:00:00.000002 >b
0 0:00:00.000002 <c
0 0:00:00.000004 >c
0 0:00:00.000005 >a
",
            )
            .unwrap(),
        )
        .unwrap();
        assert!(validate(&trace).is_empty());
    }

    #[test]
    fn test_reports_each_problem() {
        let mut names = NameTable::new();
        let a = names.intern("a");
        let b = names.intern("b");
        let child = |begin, end| Interval {
            id: b,
            begin,
            end,
            children: Vec::new(),
        };
        let root = Interval {
            id: a,
            begin: 10,
            end: 20,
            children: vec![child(12, 15), child(14, 25)],
        };
        let stats = TraceStats {
            max_depth: 1,
            min_time: 10,
            max_time: 20,
            intervals: 3,
        };
        let trace = Trace::new(vec![vec![root, child(9, 8)]], names, stats);

        let kinds: Vec<ViolationKind> = validate(&trace).into_iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::EscapesParent {
                    parent_begin: 10,
                    parent_end: 20
                },
                ViolationKind::OverlapsSibling { previous_end: 15 },
                ViolationKind::OutOfBounds {
                    min_time: 10,
                    max_time: 20
                },
                ViolationKind::Inverted,
                ViolationKind::OverlapsSibling { previous_end: 20 },
                ViolationKind::OutOfBounds {
                    min_time: 10,
                    max_time: 20
                },
            ]
        );
    }

    #[test]
    fn test_display() {
        let violation = Violation {
            rank: 1,
            depth: 2,
            name: "io".to_string(),
            begin: 5,
            end: 3,
            kind: ViolationKind::Inverted,
        };
        assert_eq!(
            violation.to_string(),
            "rank 1 depth 2 'io' [00:00:00.000005 - 00:00:00.000003]: ends before it begins"
        );
    }
}
