//! Payloads returned to collaborators (CLI, web front ends).

use serde::Serialize;
use thiserror::Error;

use super::error::{FailureKind, TrackingError};
use super::TrackingResult;

/// Status shown when a page had history but no status label.
pub const STATUS_PLACEHOLDER: &str = "Status found but unclear";

/// Successful tracking outcome, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingReport {
    /// Normalized AWB number.
    pub awb: String,
    /// Current status, or [`STATUS_PLACEHOLDER`].
    pub status: String,
    /// Delivery detail line.
    pub details: String,
    /// Dated history lines, at most eight.
    pub history: Vec<String>,
    /// Candidate URL that produced the data.
    pub source_url: String,
    /// Manual tracking link for the user.
    pub tracking_url: String,
}

impl TrackingReport {
    pub(crate) fn from_result(result: TrackingResult, tracking_url: String) -> Self {
        let TrackingResult {
            awb,
            status,
            details,
            history,
            source_url,
        } = result;
        Self {
            awb,
            status: status.unwrap_or_else(|| STATUS_PLACEHOLDER.to_string()),
            details,
            history,
            source_url,
            tracking_url,
        }
    }
}

/// Failed tracking outcome, ready to render.
///
/// Always carries a manual tracking link so the user has somewhere to go.
#[derive(Debug, Clone, Serialize, Error)]
#[error("{message}")]
pub struct TrackingFailure {
    /// AWB as entered (trimmed and upper-cased, possibly invalid).
    pub awb: String,
    /// Failure classification.
    pub kind: FailureKind,
    /// User-facing description.
    #[serde(rename = "error")]
    pub message: String,
    /// Manual tracking link for the user.
    pub tracking_url: String,
    /// The underlying error.
    #[serde(skip)]
    #[source]
    pub source: TrackingError,
}

impl TrackingFailure {
    pub(crate) fn new(awb: impl Into<String>, error: TrackingError, tracking_url: String) -> Self {
        Self {
            awb: awb.into(),
            kind: error.kind(),
            message: error.to_string(),
            tracking_url,
            source: error,
        }
    }
}
