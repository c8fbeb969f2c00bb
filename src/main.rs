//! CLI entry point for the AWB tracker.

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use awb_tracker_core::{
    FailureKind, Tracker, TrackingError, TrackingFailure, TrackingReport,
};
use clap::Parser;
use tracing::{debug, info};

mod app_config;
mod cli;
mod output;

use app_config::VerbositySetting;
use cli::Args;

/// Process exit outcome for a batch of AWBs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Partial,
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(value: ProcessExit) -> Self {
        match value {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Failure => ExitCode::from(1),
            ProcessExit::Partial => ExitCode::from(2),
        }
    }
}

/// Maps success/failure counts to the process exit outcome.
pub(crate) fn determine_exit_outcome(succeeded: usize, failed: usize) -> ProcessExit {
    if failed == 0 {
        ProcessExit::Success
    } else if succeeded > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let file_config = app_config::load_file_config(args.config.as_deref())?;

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > info
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => file_config
                .as_ref()
                .and_then(|cfg| cfg.verbosity)
                .unwrap_or(VerbositySetting::Default)
                .default_level(),
            1 => "debug",
            _ => "trace",
        }
    };
    init_tracing(default_level);

    debug!(?args, "CLI arguments parsed");

    let tracker_config = app_config::build_tracker_config(file_config.as_ref(), &args)?;
    let tracker =
        Tracker::from_config(&tracker_config).context("Failed to initialize tracker")?;

    let Some(awbs) = collect_input(&args)? else {
        output::print_quick_start_guidance();
        return Ok(ExitCode::SUCCESS);
    };

    info!(count = awbs.len(), base_url = %tracker_config.base_url, "Tracking AWBs");

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    for raw in &awbs {
        let outcome = if raw.trim().is_empty() {
            Err(empty_awb_failure(&tracker))
        } else {
            tracker.track(raw).await
        };

        if outcome.is_ok() {
            succeeded += 1;
        } else {
            failed += 1;
        }
        print_outcome(&outcome, args.json)?;
    }

    info!(succeeded, failed, "Tracking complete");
    Ok(determine_exit_outcome(succeeded, failed).into())
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Returns AWBs from arguments or piped stdin; `None` when there is no input.
fn collect_input(args: &Args) -> Result<Option<Vec<String>>> {
    if !args.awbs.is_empty() {
        return Ok(Some(args.awbs.clone()));
    }
    if io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read AWB numbers from stdin")?;
    let awbs: Vec<String> = buffer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    Ok(if awbs.is_empty() { None } else { Some(awbs) })
}

fn empty_awb_failure<F>(tracker: &Tracker<F>) -> TrackingFailure
where
    F: awb_tracker_core::PageFetcher,
{
    TrackingFailure {
        awb: String::new(),
        kind: FailureKind::InvalidIdentifier,
        message: output::EMPTY_AWB_MESSAGE.to_string(),
        tracking_url: tracker.direct_tracking_url(""),
        source: TrackingError::invalid_identifier(""),
    }
}

fn print_outcome(outcome: &Result<TrackingReport, TrackingFailure>, json: bool) -> Result<()> {
    if json {
        println!("{}", output::render_json(outcome)?);
        return Ok(());
    }
    match outcome {
        Ok(report) => print!("{}", output::render_report(report)),
        Err(failure) => print!("{}", output::render_failure(failure)),
    }
    Ok(())
}
