use super::HandlerContext;
use crate::args::InputArgs;
use crate::output::print_json;
use anyhow::Result;
use rankscope_sdk::types::Violation;
use serde::Serialize;

#[derive(Serialize)]
struct CheckReport {
    file: String,
    ranks: usize,
    intervals: usize,
    max_depth: usize,
    violations: Vec<Violation>,
}

pub fn handle(ctx: &HandlerContext, input: &InputArgs) -> Result<()> {
    let loaded = ctx.load(input)?;
    let trace = &loaded.trace;

    let report = CheckReport {
        file: input.file.display().to_string(),
        ranks: trace.ranks(),
        intervals: trace.interval_count(),
        max_depth: trace.max_depth(),
        violations: rankscope_sdk::validate(trace),
    };

    if ctx.is_json() {
        print_json(&report)?;
    } else if report.violations.is_empty() {
        println!(
            "{} {}: {} intervals on {} ranks, max depth {}",
            ctx.style.good("OK"),
            report.file,
            report.intervals,
            report.ranks,
            report.max_depth
        );
    } else {
        for violation in &report.violations {
            println!("{} {}", ctx.style.bad("error:"), violation);
        }
    }

    if !report.violations.is_empty() {
        anyhow::bail!(
            "{} nesting violation(s) in {}",
            report.violations.len(),
            report.file
        );
    }

    Ok(())
}
