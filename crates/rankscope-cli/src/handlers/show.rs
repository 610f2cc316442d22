use super::HandlerContext;
use crate::args::InputArgs;
use crate::output::print_json;
use anyhow::Result;
use rankscope_sdk::types::format_timestamp;

pub fn handle(ctx: &HandlerContext, input: &InputArgs, segment: &str, total: bool) -> Result<()> {
    let loaded = ctx.load(input)?;
    let stats = rankscope_sdk::segment_stats(&loaded.trace, segment)?;

    if ctx.is_json() {
        return print_json(&stats);
    }

    if !total {
        for rank in stats.active_ranks() {
            println!(
                "{:>10} {:>20} {:>20}",
                rank.rank,
                rank.count,
                format_timestamp(rank.total)
            );
        }
    }
    println!(
        "{:>10} {:>20} {:>20}",
        "Total:",
        stats.count,
        format_timestamp(stats.total)
    );

    Ok(())
}
