use super::HandlerContext;
use crate::args::InputArgs;
use crate::output::print_json;
use anyhow::Result;
use rankscope_sdk::types::Color;
use serde::Serialize;

#[derive(Serialize)]
struct ColorEntry<'a> {
    name: &'a str,
    #[serde(flatten)]
    color: Color,
}

pub fn handle(
    ctx: &HandlerContext,
    input: &InputArgs,
    random: bool,
    seed: Option<u64>,
) -> Result<()> {
    let loaded = ctx.load(input)?;
    let random = random || seed.is_some();
    let seed = seed.or(ctx.config.view.seed);
    let palette = rankscope_sdk::palette(&loaded.trace, random, seed);

    if ctx.is_json() {
        let entries: Vec<ColorEntry> = palette
            .iter()
            .map(|(_, name, color)| ColorEntry { name, color })
            .collect();
        return print_json(&entries);
    }

    print!("{}", palette.to_text());
    Ok(())
}
