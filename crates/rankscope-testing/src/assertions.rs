//! Custom assertions for rankscope traces.
//!
//! Provides high-level checks that make tests more readable:
//! - Structural validity of built forests
//! - Forest equality independent of name-id assignment
//! - JSON output checks for CLI tests

use anyhow::{Context, Result};
use rankscope_types::{Interval, Trace};
use serde_json::Value;

/// Assert that a built trace satisfies every nesting rule and that its
/// summary values agree with its forests.
pub fn assert_well_formed(trace: &Trace) -> Result<()> {
    let violations = rankscope_engine::validate(trace);
    if let Some(first) = violations.first() {
        anyhow::bail!(
            "{} structural violations, first: {}",
            violations.len(),
            first
        );
    }

    let mut intervals = 0;
    let mut deepest = 0;
    trace.walk(|_, _, depth| {
        intervals += 1;
        deepest = deepest.max(depth);
    });

    if intervals != trace.interval_count() {
        anyhow::bail!(
            "Trace reports {} intervals but its forests hold {}",
            trace.interval_count(),
            intervals
        );
    }
    if intervals > 0 && deepest != trace.max_depth() {
        anyhow::bail!(
            "Trace reports max depth {} but its deepest interval is at {}",
            trace.max_depth(),
            deepest
        );
    }

    Ok(())
}

/// Indented `name [begin, end]` listing of every rank's forest
pub fn render_forests(trace: &Trace) -> String {
    let mut out = String::new();
    for (rank, forest) in trace.forests().iter().enumerate() {
        out.push_str(&format!("rank {}\n", rank));
        for root in forest {
            render(trace, root, 1, &mut out);
        }
    }
    out
}

fn render(trace: &Trace, interval: &Interval, depth: usize, out: &mut String) {
    out.push_str(&format!(
        "{}{} [{}, {}]\n",
        "  ".repeat(depth),
        trace.name(interval.id),
        interval.begin,
        interval.end
    ));
    for child in &interval.children {
        render(trace, child, depth + 1, out);
    }
}

/// Assert that two traces hold the same named intervals on every rank
pub fn assert_same_forests(left: &Trace, right: &Trace) -> Result<()> {
    let (left, right) = (render_forests(left), render_forests(right));
    if left != right {
        anyhow::bail!("Forests differ:\n--- left\n{}--- right\n{}", left, right);
    }
    Ok(())
}

/// Assert that a JSON document holds `expected` entries in the array at `key`.
pub fn assert_array_len(json: &Value, key: &str, expected: usize) -> Result<()> {
    let items = json[key]
        .as_array()
        .with_context(|| format!("Expected '{}' array in JSON", key))?;

    if items.len() != expected {
        anyhow::bail!("Expected {} entries in '{}', got {}", expected, key, items.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankscope_types::{NameTable, TraceStats};

    fn trace(stats: TraceStats) -> Trace {
        let mut names = NameTable::new();
        let a = names.intern("a");
        let root = Interval {
            id: a,
            begin: 0,
            end: 4,
            children: vec![Interval {
                id: a,
                begin: 1,
                end: 2,
                children: Vec::new(),
            }],
        };
        Trace::new(vec![vec![root]], names, stats)
    }

    #[test]
    fn test_well_formed() {
        let good = trace(TraceStats {
            max_depth: 1,
            min_time: 0,
            max_time: 4,
            intervals: 2,
        });
        assert!(assert_well_formed(&good).is_ok());
        assert_eq!(render_forests(&good), "rank 0\n  a [0, 4]\n    a [1, 2]\n");

        let miscounted = trace(TraceStats {
            max_depth: 1,
            min_time: 0,
            max_time: 4,
            intervals: 3,
        });
        assert!(assert_well_formed(&miscounted).is_err());
    }

    #[test]
    fn test_array_len() {
        let json = serde_json::json!({"ranks": [1, 2]});
        assert!(assert_array_len(&json, "ranks", 2).is_ok());
        assert!(assert_array_len(&json, "ranks", 3).is_err());
        assert!(assert_array_len(&json, "names", 0).is_err());
    }
}
