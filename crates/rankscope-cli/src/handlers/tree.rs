use super::HandlerContext;
use crate::args::InputArgs;
use crate::output::{Style, print_json};
use anyhow::Result;
use rankscope_sdk::types::{Interval, Rank, Timestamp, Trace, format_timestamp};
use serde::Serialize;

#[derive(Serialize)]
struct NodeView {
    name: String,
    begin: Timestamp,
    end: Timestamp,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeView>,
}

#[derive(Serialize)]
struct RankView {
    rank: Rank,
    intervals: Vec<NodeView>,
}

/// Intervals at least `min_duration` long; shorter ones are dropped with their subtree
fn view(trace: &Trace, intervals: &[Interval], min_duration: Timestamp) -> Vec<NodeView> {
    intervals
        .iter()
        .filter(|interval| interval.duration() >= min_duration)
        .map(|interval| NodeView {
            name: trace.name(interval.id).to_string(),
            begin: interval.begin,
            end: interval.end,
            children: view(trace, &interval.children, min_duration),
        })
        .collect()
}

fn print_node(node: &NodeView, depth: usize, style: Style) {
    println!(
        "{}{} {}",
        "  ".repeat(depth),
        style.name(&node.name),
        style.dim(&format!(
            "{} - {} ({})",
            format_timestamp(node.begin),
            format_timestamp(node.end),
            format_timestamp(node.end.saturating_sub(node.begin))
        ))
    );
    for child in &node.children {
        print_node(child, depth + 1, style);
    }
}

pub fn handle(
    ctx: &HandlerContext,
    input: &InputArgs,
    rank: Option<Rank>,
    min_duration: Option<Timestamp>,
) -> Result<()> {
    let loaded = ctx.load(input)?;
    let trace = &loaded.trace;
    let min_duration = ctx.min_duration(min_duration);

    let ranks: Vec<Rank> = match rank {
        Some(rank) if rank >= trace.ranks() => {
            anyhow::bail!("rank {} not in trace ({} ranks)", rank, trace.ranks())
        }
        Some(rank) => vec![rank],
        None => (0..trace.ranks()).collect(),
    };

    let views: Vec<RankView> = ranks
        .into_iter()
        .map(|rank| RankView {
            rank,
            intervals: view(trace, trace.forest(rank).unwrap_or_default(), min_duration),
        })
        .collect();

    if ctx.is_json() {
        return print_json(&views);
    }

    for rank in &views {
        println!("{}", ctx.style.label(&format!("rank {}", rank.rank)));
        for node in &rank.intervals {
            print_node(node, 1, ctx.style);
        }
    }

    Ok(())
}
