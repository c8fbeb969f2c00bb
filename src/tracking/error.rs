//! Error types for tracking operations.
//!
//! Every failure carries a user-facing message with a suggestion line,
//! following the What/Why/Fix pattern used across the project.

use serde::Serialize;
use thiserror::Error;

/// Coarse failure taxonomy exposed to collaborators.
///
/// Several [`TrackingError`] variants share a kind (all transport problems
/// are [`FailureKind::NetworkFailure`]), so callers match on this when they
/// only care about how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input failed the shape check; fixable by the user.
    InvalidIdentifier,
    /// The courier explicitly reported that no shipment exists.
    NoRecordFound,
    /// Page fetched but carried no recognizable status or history.
    UnreadablePage,
    /// Transport error, timeout, or non-success HTTP status.
    NetworkFailure,
    /// Every candidate URL failed.
    AllCandidatesExhausted,
}

impl FailureKind {
    /// Returns the stable label used in text output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidIdentifier => "invalid_identifier",
            Self::NoRecordFound => "no_record_found",
            Self::UnreadablePage => "unreadable_page",
            Self::NetworkFailure => "network_failure",
            Self::AllCandidatesExhausted => "all_candidates_exhausted",
        }
    }
}

/// Errors that can occur while tracking a shipment.
#[derive(Debug, Clone, Error)]
pub enum TrackingError {
    /// The AWB number does not have the expected shape
    #[error(
        "invalid AWB number '{input}': expected 6-25 letters, digits or hyphens\n  Suggestion: Check the AWB number printed on the receipt and try again"
    )]
    InvalidIdentifier {
        /// The input after trimming and upper-casing
        input: String,
    },

    /// The courier page says the AWB is unknown
    #[error(
        "no record found for AWB {awb} on Blue Dart\n  Suggestion: Double-check the AWB number"
    )]
    NoRecordFound {
        /// The AWB that has no record
        awb: String,
    },

    /// The page had neither a status label nor dated history lines
    #[error(
        "no readable status for AWB {awb} at {source_url} (the site may be blocking automated requests or its layout changed)"
    )]
    UnreadablePage {
        /// The AWB being tracked
        awb: String,
        /// Page that could not be read
        source_url: String,
    },

    /// Transport-level failure (DNS, connection refused, TLS, body read)
    #[error("network error fetching {url}: {reason}")]
    Network {
        /// The URL that failed
        url: String,
        /// Underlying error description
        reason: String,
    },

    /// The request did not complete within the configured timeout
    #[error("timeout after {timeout_secs}s fetching {url}")]
    Timeout {
        /// The URL that timed out
        url: String,
        /// Timeout that was exceeded
        timeout_secs: u64,
    },

    /// The server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned the status
        url: String,
        /// The HTTP status code
        status: u16,
    },

    /// The HTTP client could not be constructed
    #[error("HTTP client construction failed: {reason}")]
    HttpClient {
        /// Why construction failed
        reason: String,
    },

    /// Every candidate URL failed
    #[error(
        "live tracking fetch failed for AWB {awb} after {tried} attempt(s). Error: {last_error}\n  Suggestion: Verify manually using the direct tracking link: {direct_tracking_url}"
    )]
    AllCandidatesExhausted {
        /// The AWB being tracked
        awb: String,
        /// Number of candidate URLs tried
        tried: usize,
        /// The last recorded failure
        last_error: Box<TrackingError>,
        /// Manual fallback link for the user
        direct_tracking_url: String,
    },
}

impl TrackingError {
    /// Creates an `InvalidIdentifier` error.
    #[must_use]
    pub fn invalid_identifier(input: &str) -> Self {
        Self::InvalidIdentifier {
            input: input.to_string(),
        }
    }

    /// Creates a `NoRecordFound` error.
    #[must_use]
    pub fn no_record_found(awb: &str) -> Self {
        Self::NoRecordFound {
            awb: awb.to_string(),
        }
    }

    /// Creates an `UnreadablePage` error.
    #[must_use]
    pub fn unreadable_page(awb: &str, source_url: &str) -> Self {
        Self::UnreadablePage {
            awb: awb.to_string(),
            source_url: source_url.to_string(),
        }
    }

    /// Creates a `Network` error.
    #[must_use]
    pub fn network(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Classifies this error into the collaborator-facing taxonomy.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidIdentifier { .. } => FailureKind::InvalidIdentifier,
            Self::NoRecordFound { .. } => FailureKind::NoRecordFound,
            Self::UnreadablePage { .. } => FailureKind::UnreadablePage,
            Self::Network { .. }
            | Self::Timeout { .. }
            | Self::HttpStatus { .. }
            | Self::HttpClient { .. } => FailureKind::NetworkFailure,
            Self::AllCandidatesExhausted { .. } => FailureKind::AllCandidatesExhausted,
        }
    }

    /// Returns true if the orchestrator should move on to the next candidate URL.
    #[must_use]
    pub fn is_candidate_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            FailureKind::NoRecordFound | FailureKind::UnreadablePage | FailureKind::NetworkFailure
        )
    }
}
