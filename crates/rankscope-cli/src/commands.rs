use super::args::{Cli, Commands};
use super::handlers::{self, HandlerContext};
use anyhow::Result;
use rankscope_sdk::Config;
use rankscope_sdk::config::resolve_config_path;

pub fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;
    tracing::debug!(path = %config_path.display(), "config resolved");

    let ctx = HandlerContext::new(config, cli.format);

    match cli.command {
        Commands::Info { input } => handlers::info::handle(&ctx, &input),

        Commands::Show {
            input,
            segment,
            total,
        } => handlers::show::handle(&ctx, &input, &segment, total),

        Commands::Tree {
            input,
            rank,
            min_duration,
        } => handlers::tree::handle(&ctx, &input, rank, min_duration),

        Commands::At {
            input,
            rank,
            time,
            depth,
            min_duration,
            hidden,
        } => handlers::at::handle(
            &ctx,
            &input,
            handlers::at::AtQuery {
                rank,
                time,
                depth,
                min_duration,
                hidden,
            },
        ),

        Commands::Check { input } => handlers::check::handle(&ctx, &input),

        Commands::Colors {
            input,
            random,
            seed,
        } => handlers::colors::handle(&ctx, &input, random, seed),
    }
}
