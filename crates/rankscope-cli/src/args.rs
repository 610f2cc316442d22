use crate::types::{LogLevel, OutputFormat};
use clap::{Args, Parser, Subcommand};
use rankscope_sdk::types::ColumnSplit;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rankscope")]
#[command(about = "Inspect per-rank interval timelines of distributed execution traces", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Config file (default: RANKSCOPE_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Trace file selection shared by every command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Trace file (simple line format or annotation export)
    pub file: PathBuf,

    /// Read FILE as an annotation trace
    #[arg(long, conflicts_with = "simple")]
    pub annotation: bool,

    /// Read FILE as a simple line trace
    #[arg(long)]
    pub simple: bool,

    /// Field separator of tabular annotation traces (whitespace, comma, aligned)
    #[arg(long)]
    pub split: Option<ColumnSplit>,

    /// Count MPI function regions as events
    #[arg(long)]
    pub mpi_functions: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize ranks, depth, time bounds and names
    Info {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Count the occurrences and total time of a segment per rank
    Show {
        #[command(flatten)]
        input: InputArgs,

        /// Interval name
        segment: String,

        /// Show the total only
        #[arg(short, long)]
        total: bool,
    },

    /// Print the interval forests
    Tree {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long)]
        rank: Option<usize>,

        /// Skip intervals shorter than this many microseconds
        #[arg(long)]
        min_duration: Option<u64>,
    },

    /// Find the deepest interval under a point in time
    At {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long)]
        rank: usize,

        /// H:MM:SS.ffffff, or plain microseconds
        #[arg(long)]
        time: String,

        /// Deepest level to search (roots are level 0)
        #[arg(long)]
        depth: Option<usize>,

        /// Treat intervals shorter than this many microseconds as transparent
        #[arg(long)]
        min_duration: Option<u64>,

        /// Never report intervals with this name
        #[arg(long = "hide", value_name = "NAME")]
        hidden: Vec<String>,
    },

    /// Validate the nesting of every interval
    Check {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the name palette as `name r g b` lines
    Colors {
        #[command(flatten)]
        input: InputArgs,

        /// Random colors instead of the distinct table
        #[arg(long)]
        random: bool,

        /// Seed for random colors (implies --random)
        #[arg(long)]
        seed: Option<u64>,
    },
}
