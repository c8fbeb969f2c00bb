//! HTML-to-structured-data extraction for Blue Dart tracking pages.
//!
//! Extraction is deliberately regex based: pages are reduced to plain text
//! with best-effort tag stripping, then scanned with ordered label patterns
//! (first match wins) and a date heuristic for history lines. Malformed or
//! unbalanced markup never causes a failure here; at worst a pattern simply
//! does not match.
//!
//! Everything in this module is pure and deterministic.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::TrackingResult;
use super::error::TrackingError;
use super::utils::{collapse_whitespace, compile_static_regex, html_unescape, split_lines};

/// Placeholder used when no detail label is present on the page.
pub const DETAILS_PLACEHOLDER: &str = "Detail not clearly available";

/// Maximum number of history lines kept per result.
pub const MAX_HISTORY_LINES: usize = 8;

const MIN_HISTORY_LINE_CHARS: usize = 8;

static SCRIPT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?is)<script.*?>.*?</script>"));
static STYLE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?is)<style.*?>.*?</style>"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"<[^>]+>"));
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"\n{2,}"));

static CURRENT_STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| label_regex(r"Current\s*Status"));
static SHIPMENT_STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| label_regex(r"Shipment\s*Status"));
static STATUS_RE: LazyLock<Regex> = LazyLock::new(|| label_regex(r"Status"));

static EXPECTED_DELIVERY_RE: LazyLock<Regex> =
    LazyLock::new(|| label_regex(r"Expected\s*Delivery\s*Date"));
static DELIVERED_ON_RE: LazyLock<Regex> = LazyLock::new(|| label_regex(r"Delivered\s*On"));
static LAST_SCANNED_RE: LazyLock<Regex> =
    LazyLock::new(|| label_regex(r"Last\s*Scanned\s*At"));

static NO_RECORDS_FOUND_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)no\s+records?\s+found"));
static INVALID_AWB_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)invalid\s+awb"));
static UNABLE_TO_FIND_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)unable\s+to\s+find"));

static DAY_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r"(?i)\d{1,2}[-/ ](?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)")
});
static NUMERIC_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"\d{2}[/-]\d{2}[/-]\d{4}"));

/// Status labels in priority order.
static STATUS_PATTERNS: [&LazyLock<Regex>; 3] =
    [&CURRENT_STATUS_RE, &SHIPMENT_STATUS_RE, &STATUS_RE];

/// Detail labels in priority order.
static DETAIL_PATTERNS: [&LazyLock<Regex>; 3] =
    [&EXPECTED_DELIVERY_RE, &DELIVERED_ON_RE, &LAST_SCANNED_RE];

/// Phrases the courier uses to say an AWB is unknown.
static NO_RECORD_PATTERNS: [&LazyLock<Regex>; 3] =
    [&NO_RECORDS_FOUND_RE, &INVALID_AWB_RE, &UNABLE_TO_FIND_RE];

/// Builds a `Label: value` pattern capturing the rest of the line.
fn label_regex(label: &str) -> Regex {
    compile_static_regex(&format!(r"(?i){label}\s*[:\-]\s*([^<\n\r]+)"))
}

/// Reduces HTML to plain text, one text run per line.
///
/// Script and style blocks are dropped, every remaining tag becomes a line
/// break, entities are decoded, and runs of blank lines are collapsed.
#[must_use]
pub fn to_plain_text(html: &str) -> String {
    let without_script = SCRIPT_BLOCK_RE.replace_all(html, " ");
    let without_style = STYLE_BLOCK_RE.replace_all(&without_script, " ");
    let text = TAG_RE.replace_all(&without_style, "\n");
    let text = html_unescape(&text);
    BLANK_RUN_RE.replace_all(&text, "\n").into_owned()
}

/// Returns true if the page says the AWB has no record.
#[must_use]
pub fn detect_no_record(text: &str) -> bool {
    NO_RECORD_PATTERNS.iter().any(|pattern| pattern.is_match(text))
}

/// Returns the first status value found, whitespace-normalized.
#[must_use]
pub fn extract_status(text: &str) -> Option<String> {
    first_match(text, &STATUS_PATTERNS)
}

/// Returns the first detail value found, or [`DETAILS_PLACEHOLDER`].
#[must_use]
pub fn extract_details(text: &str) -> String {
    first_match(text, &DETAIL_PATTERNS).unwrap_or_else(|| DETAILS_PLACEHOLDER.to_string())
}

/// Collects dated lines as history entries.
///
/// Any Unicode line boundary (including a bare `\r`) ends a line. Lines
/// are whitespace-normalized, must be at least eight characters long, and
/// must contain a `DD Mon` style or `DD/MM/YYYY` style date. Duplicates
/// are dropped (first occurrence wins) and at most [`MAX_HISTORY_LINES`]
/// entries are returned.
#[must_use]
pub fn extract_history(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    split_lines(text)
        .map(collapse_whitespace)
        .filter(|line| is_history_line(line))
        .filter(|line| seen.insert(line.clone()))
        .take(MAX_HISTORY_LINES)
        .collect()
}

fn is_history_line(line: &str) -> bool {
    line.chars().count() >= MIN_HISTORY_LINE_CHARS
        && (DAY_MONTH_RE.is_match(line) || NUMERIC_DATE_RE.is_match(line))
}

/// Only the first pattern that matches is consulted; a blank value counts as missing.
fn first_match(text: &str, patterns: &[&LazyLock<Regex>]) -> Option<String> {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|value| collapse_whitespace(value.as_str()))
        .filter(|value| !value.is_empty())
}

/// Extracts a [`TrackingResult`] from a fetched tracking page.
///
/// # Errors
///
/// Returns [`TrackingError::NoRecordFound`] when the page reports an unknown
/// AWB (checked first, regardless of other content), and
/// [`TrackingError::UnreadablePage`] when neither a status nor any history
/// line could be found.
pub fn parse_tracking_html(
    html: &str,
    awb: &str,
    source_url: &str,
) -> Result<TrackingResult, TrackingError> {
    let text = to_plain_text(html);

    if detect_no_record(&text) {
        debug!(awb, source_url, "Page reports no record for AWB");
        return Err(TrackingError::no_record_found(awb));
    }

    let status = extract_status(&text);
    let details = extract_details(&text);
    let history = extract_history(&text);

    if status.is_none() && history.is_empty() {
        debug!(awb, source_url, "No status or history found in page");
        return Err(TrackingError::unreadable_page(awb, source_url));
    }

    debug!(
        awb,
        source_url,
        status = status.as_deref().unwrap_or("<none>"),
        history_lines = history.len(),
        "Extracted tracking data"
    );

    Ok(TrackingResult::new(awb, status, details, history, source_url))
}
