use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The Crossweave Developers",
    version,
    about = "Crossweave CLI - Builds dense crossword grids from a word list and fills the remaining space from a dictionary.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used by the parallel search.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build crossword grids containing every word of a word list.
    Build(BuildArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    // --- Core Arguments ---
    /// Path to the puzzle word list, one word per line.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub words: PathBuf,

    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the finished grids to this file instead of only printing them.
    /// With several solutions, files are numbered (e.g. grid-1.txt, grid-2.txt).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Grid Overrides ---
    /// Number of grid rows, overriding the config file.
    #[arg(short, long, value_name = "INT")]
    pub rows: Option<usize>,

    /// Number of grid columns, overriding the config file.
    #[arg(short = 'C', long, value_name = "INT")]
    pub cols: Option<usize>,

    // --- Search Overrides ---
    /// Override the number of finished grids to return.
    #[arg(short, long, value_name = "INT")]
    pub num_solutions: Option<usize>,

    /// Override the number of boards kept at each search level.
    #[arg(short, long, value_name = "INT")]
    pub beam_width: Option<usize>,

    /// Expand search levels on all worker threads. Results may differ between runs.
    #[arg(long)]
    pub parallel: bool,

    // --- Coating ---
    /// Dictionary used to fill white space with extra words, overriding the config file.
    #[arg(short, long, value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Skip coating even if a dictionary is configured.
    #[arg(long)]
    pub no_coat: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.beam-width=50
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
