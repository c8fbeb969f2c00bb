//! CLI output formatting for tracking payloads.

use std::fmt::Write as _;

use anyhow::Result;
use awb_tracker_core::{TrackingFailure, TrackingReport};

/// Message when no input was provided at all.
pub const NO_INPUT_GUIDANCE: &str =
    "No input provided. Pass AWB numbers as arguments or pipe them via stdin.";

/// Example for passing AWB numbers as arguments.
pub const INPUT_ARG_EXAMPLE: &str = "Example: awb-tracker 12345678901";

/// Example for piping input.
pub const INPUT_PIPE_EXAMPLE: &str = "Example: cat awbs.txt | awb-tracker --json";

/// Failure shown for an explicitly empty AWB argument.
pub const EMPTY_AWB_MESSAGE: &str = "AWB number is required. Please enter an AWB number.";

/// Prints quick-start guidance to stdout.
pub fn print_quick_start_guidance() {
    println!("{NO_INPUT_GUIDANCE}");
    println!("{INPUT_ARG_EXAMPLE}");
    println!("{INPUT_PIPE_EXAMPLE}");
}

/// Renders a successful report as human-readable text.
#[must_use]
pub fn render_report(report: &TrackingReport) -> String {
    let mut out = format!(
        "AWB {}\n  Status:  {}\n  Details: {}\n",
        report.awb, report.status, report.details
    );
    if report.history.is_empty() {
        out.push_str("  History: (none found)\n");
    } else {
        out.push_str("  History:\n");
        for line in &report.history {
            let _ = writeln!(out, "    - {line}");
        }
    }
    let _ = writeln!(out, "  Source:  {}", report.source_url);
    let _ = writeln!(out, "  Track manually: {}", report.tracking_url);
    out
}

/// Renders a failure as human-readable text.
#[must_use]
pub fn render_failure(failure: &TrackingFailure) -> String {
    let awb = if failure.awb.is_empty() {
        "(empty)"
    } else {
        failure.awb.as_str()
    };
    format!(
        "AWB {awb}\n  Error [{}]: {}\n  Track manually: {}\n",
        failure.kind.as_str(),
        failure.message,
        failure.tracking_url
    )
}

/// Renders either payload as a single JSON line.
pub fn render_json(outcome: &Result<TrackingReport, TrackingFailure>) -> Result<String> {
    let line = match outcome {
        Ok(report) => serde_json::to_string(report)?,
        Err(failure) => serde_json::to_string(failure)?,
    };
    Ok(line)
}
