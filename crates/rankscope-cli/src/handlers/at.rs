use super::HandlerContext;
use crate::args::InputArgs;
use crate::output::print_json;
use anyhow::{Context, Result};
use rankscope_sdk::types::{
    EventId, HitQuery, Rank, Timestamp, format_timestamp, parse_timestamp,
};
use serde::Serialize;

pub struct AtQuery {
    pub rank: Rank,
    pub time: String,
    pub depth: Option<usize>,
    pub min_duration: Option<Timestamp>,
    pub hidden: Vec<String>,
}

#[derive(Serialize)]
struct HitView {
    name: String,
    id: EventId,
    depth: usize,
    begin: Timestamp,
    end: Timestamp,
}

#[derive(Serialize)]
struct AtReport {
    rank: Rank,
    time: Timestamp,
    hit: Option<HitView>,
}

/// Plain digits are microseconds, anything else must be a timestamp
fn parse_time(text: &str) -> Result<Timestamp> {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse()
            .with_context(|| format!("time '{}' out of range", text));
    }
    Ok(parse_timestamp(text)?)
}

pub fn handle(ctx: &HandlerContext, input: &InputArgs, query: AtQuery) -> Result<()> {
    let time = parse_time(&query.time)?;
    let loaded = ctx.load(input)?;
    let trace = &loaded.trace;

    let hidden_names = query
        .hidden
        .iter()
        .chain(ctx.config.view.hidden.iter())
        .map(String::as_str);
    let mut hit_query = HitQuery::new(query.rank, time)
        .with_min_duration(ctx.min_duration(query.min_duration))
        .with_hidden(rankscope_sdk::resolve_names(trace, hidden_names));
    if let Some(depth) = query.depth {
        hit_query = hit_query.with_max_depth(depth);
    }

    let hit = rankscope_sdk::hit_test(trace, &hit_query).map(|hit| HitView {
        name: trace.name(hit.interval.id).to_string(),
        id: hit.interval.id,
        depth: hit.depth,
        begin: hit.interval.begin,
        end: hit.interval.end,
    });

    let report = AtReport {
        rank: query.rank,
        time,
        hit,
    };

    if ctx.is_json() {
        return print_json(&report);
    }

    match &report.hit {
        Some(hit) => println!(
            "rank {} at {}: {} (depth {}, {} - {})",
            report.rank,
            format_timestamp(report.time),
            ctx.style.name(&hit.name),
            hit.depth,
            format_timestamp(hit.begin),
            format_timestamp(hit.end)
        ),
        None => println!(
            "rank {} at {}: {}",
            report.rank,
            format_timestamp(report.time),
            ctx.style.dim("nothing")
        ),
    }

    Ok(())
}
