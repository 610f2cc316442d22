use super::HandlerContext;
use crate::args::InputArgs;
use crate::output::print_json;
use anyhow::Result;
use rankscope_sdk::types::{NameSummary, Timestamp, format_timestamp};
use serde::Serialize;

#[derive(Serialize)]
struct InfoReport {
    file: String,
    format: String,
    ranks: usize,
    intervals: usize,
    max_depth: usize,
    min_time: Timestamp,
    max_time: Timestamp,
    names: Vec<NameSummary>,
}

pub fn handle(ctx: &HandlerContext, input: &InputArgs) -> Result<()> {
    let loaded = ctx.load(input)?;
    let trace = &loaded.trace;

    let report = InfoReport {
        file: input.file.display().to_string(),
        format: loaded.format.to_string(),
        ranks: trace.ranks(),
        intervals: trace.interval_count(),
        max_depth: trace.max_depth(),
        min_time: trace.min_time(),
        max_time: trace.max_time(),
        names: rankscope_sdk::name_summary(trace),
    };

    if ctx.is_json() {
        return print_json(&report);
    }

    let style = ctx.style;
    println!("{} {}", style.label("File:"), report.file);
    println!("{} {}", style.label("Format:"), report.format);
    println!("{} {}", style.label("Ranks:"), report.ranks);
    println!("{} {}", style.label("Intervals:"), report.intervals);
    println!("{} {}", style.label("Max depth:"), report.max_depth);
    println!(
        "{} {} - {} (span {})",
        style.label("Time:"),
        format_timestamp(report.min_time),
        format_timestamp(report.max_time),
        format_timestamp(trace.span())
    );

    if report.names.is_empty() {
        return Ok(());
    }

    println!("{}", style.label("Names:"));
    let width = report.names.iter().map(|n| n.name.len()).max().unwrap_or(0);
    for entry in &report.names {
        println!(
            "  {}{} {:>8} {:>16}",
            style.name(&entry.name),
            " ".repeat(width - entry.name.len()),
            entry.count,
            format_timestamp(entry.total)
        );
    }

    Ok(())
}
