//! Command-line arguments of the `corkboard` binary.

use clap::Parser;

/// Lay out a board file and write it as SVG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Board file to render (TOML)
    #[arg(help = "Path to the board file")]
    pub input: String,

    /// Where to write the rendered SVG
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Configuration file (TOML); searched for when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overrides the configured seed for shuffle, jitter and tilt
    #[arg(long)]
    pub seed: Option<u32>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
