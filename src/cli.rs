//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Live Blue Dart shipment tracking by AWB number.
///
/// Pass AWB numbers as arguments or pipe them one per line via stdin.
#[derive(Parser, Debug)]
#[command(name = "awb-tracker")]
#[command(author, version, about)]
pub struct Args {
    /// AWB numbers to track
    #[arg(value_name = "AWB")]
    pub awbs: Vec<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print one JSON object per AWB instead of text
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds (1-120)
    #[arg(short = 't', long, value_parser = clap::value_parser!(u64).range(1..=120))]
    pub timeout: Option<u64>,

    /// Tracking site base URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Config file path (default: $XDG_CONFIG_HOME/awb-tracker/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
