//! Tracking orchestration across candidate URLs.
//!
//! [`Tracker`] validates the AWB, then tries each candidate URL in order.
//! Fetch and extraction failures on one candidate are logged and remembered;
//! the first candidate that yields a parseable page wins. Only exhaustion or
//! an invalid AWB reaches the caller.

use tracing::{debug, info, warn};

use crate::config::TrackerConfig;

use super::candidates::TrackingEndpoints;
use super::extractor::parse_tracking_html;
use super::fetcher::{HttpFetcher, PageFetcher};
use super::identifier::{AwbNumber, normalize_awb};
use super::report::{TrackingFailure, TrackingReport};
use super::TrackingError;

/// Tracks shipments by AWB number.
///
/// Holds no per-request state, so one tracker can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Tracker<F = HttpFetcher> {
    fetcher: F,
    endpoints: TrackingEndpoints,
}

impl Tracker<HttpFetcher> {
    /// Creates a tracker against the production site with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::HttpClient`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, TrackingError> {
        Self::from_config(&TrackerConfig::default())
    }

    /// Creates a tracker from explicit configuration.
    ///
    /// The configuration is expected to be validated by the caller
    /// ([`TrackerConfig::validate`]).
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::HttpClient`] if the HTTP client cannot be built.
    pub fn from_config(config: &TrackerConfig) -> Result<Self, TrackingError> {
        Ok(Self::with_fetcher(
            HttpFetcher::new(config)?,
            TrackingEndpoints::new(config.base_url.clone()),
        ))
    }
}

impl<F: PageFetcher> Tracker<F> {
    /// Creates a tracker with a custom fetcher (stubs in tests, other transports).
    #[must_use]
    pub fn with_fetcher(fetcher: F, endpoints: TrackingEndpoints) -> Self {
        Self { fetcher, endpoints }
    }

    /// Returns the endpoints used for candidate URLs.
    #[must_use]
    pub fn endpoints(&self) -> &TrackingEndpoints {
        &self.endpoints
    }

    /// Manual tracking link for `raw` input (trimmed and upper-cased).
    ///
    /// Pure: no validation and no network access.
    #[must_use]
    pub fn direct_tracking_url(&self, raw: &str) -> String {
        self.endpoints.direct_tracking_url(&normalize_awb(raw))
    }

    /// Tracks `raw` and returns a payload for either outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackingFailure`] carrying the failure kind, a user-facing
    /// message and the manual tracking link.
    pub async fn track(&self, raw: &str) -> Result<TrackingReport, TrackingFailure> {
        self.track_awb(raw).await.map_err(|error| {
            let awb = normalize_awb(raw);
            let tracking_url = self.endpoints.direct_tracking_url(&awb);
            TrackingFailure::new(awb, error, tracking_url)
        })
    }

    /// Tracks `raw`, trying each candidate URL until one parses.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::InvalidIdentifier`] without any network call
    /// when the AWB is malformed, and
    /// [`TrackingError::AllCandidatesExhausted`] when no candidate produced a
    /// readable page.
    #[tracing::instrument(skip(self), fields(awb = tracing::field::Empty))]
    pub async fn track_awb(&self, raw: &str) -> Result<TrackingReport, TrackingError> {
        let awb = AwbNumber::parse(raw)?;
        tracing::Span::current().record("awb", awb.as_str());

        let candidates = self.endpoints.candidate_urls(&awb);
        let direct_tracking_url = self.endpoints.direct_tracking_url(awb.as_str());

        let mut last_error: Option<TrackingError> = None;
        let mut tried: usize = 0;

        for url in &candidates {
            tried += 1;
            debug!(attempt = tried, url = %url, "Trying candidate URL");

            let outcome = match self.fetcher.fetch(url).await {
                Ok(html) => parse_tracking_html(&html, awb.as_str(), url),
                Err(error) => Err(error),
            };

            match outcome {
                Ok(result) => {
                    info!(
                        attempt = tried,
                        url = %url,
                        history_lines = result.history().len(),
                        "Tracking page parsed"
                    );
                    return Ok(TrackingReport::from_result(result, direct_tracking_url));
                }
                Err(error) => {
                    debug!(
                        attempt = tried,
                        url = %url,
                        kind = error.kind().as_str(),
                        error = %error,
                        "Candidate failed, trying next"
                    );
                    last_error = Some(error);
                }
            }
        }

        let last_error = last_error.unwrap_or_else(|| {
            TrackingError::network(&direct_tracking_url, "no candidate URLs were attempted")
        });
        warn!(tried, error = %last_error, "All candidate URLs failed");

        Err(TrackingError::AllCandidatesExhausted {
            awb: awb.to_string(),
            tried,
            last_error: Box::new(last_error),
            direct_tracking_url,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::tracking::FailureKind;

    const TRACKABLE_PAGE: &str = "<div>Current Status: In Transit</div>\
        <table><tr><td>10 Feb 2026 Mumbai Hub</td></tr><tr><td>11 Feb 2026 Pune Hub</td></tr></table>";

    /// Serves canned responses per URL and records every request.
    struct StubFetcher {
        responses: HashMap<String, Result<String, TrackingError>>,
        requests: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn new(responses: Vec<(String, Result<String, TrackingError>)>) -> Self {
            Self {
                responses: responses.into_iter().collect(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, TrackingError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(TrackingError::network(url, "unexpected URL")))
        }
    }

    fn candidates(awb: &str) -> [String; 3] {
        TrackingEndpoints::default().candidate_urls(&AwbNumber::parse(awb).unwrap())
    }

    fn network_error(url: &str) -> Result<String, TrackingError> {
        Err(TrackingError::network(url, "connection refused"))
    }

    fn tracker(responses: Vec<(String, Result<String, TrackingError>)>) -> Tracker<StubFetcher> {
        Tracker::with_fetcher(StubFetcher::new(responses), TrackingEndpoints::default())
    }

    #[tokio::test]
    async fn test_falls_through_network_failures_to_third_candidate() {
        let [first, second, third] = candidates("12345678901");
        let tracker = tracker(vec![
            (first.clone(), network_error(&first)),
            (second.clone(), network_error(&second)),
            (third.clone(), Ok(TRACKABLE_PAGE.to_string())),
        ]);

        let report = tracker.track("12345678901").await.unwrap();

        assert_eq!(report.source_url, third);
        assert_eq!(report.status, "In Transit");
        assert_eq!(report.history.len(), 2);
        assert_eq!(report.tracking_url, first);
        assert_eq!(tracker.fetcher.requests(), vec![first, second, third]);
    }

    #[tokio::test]
    async fn test_first_success_stops_the_loop() {
        let [first, ..] = candidates("ABC12345");
        let tracker = tracker(vec![(first.clone(), Ok(TRACKABLE_PAGE.to_string()))]);

        let report = tracker.track_awb(" abc12345 ").await.unwrap();

        assert_eq!(report.awb, "ABC12345");
        assert_eq!(report.source_url, first);
        assert_eq!(tracker.fetcher.requests(), vec![first]);
    }

    #[tokio::test]
    async fn test_invalid_identifier_makes_no_request() {
        let tracker = tracker(Vec::new());

        let failure = tracker.track("ab!@").await.unwrap_err();

        assert_eq!(failure.kind, FailureKind::InvalidIdentifier);
        assert_eq!(failure.awb, "AB!@");
        assert!(failure.tracking_url.contains("trackNo=AB%21%40"));
        assert!(tracker.fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_extraction_failures_fall_through_too() {
        let [first, second, third] = candidates("12345678901");
        let tracker = tracker(vec![
            (first.clone(), Ok("<p>No records found</p>".to_string())),
            (second.clone(), Ok("<p>Access denied</p>".to_string())),
            (third.clone(), Ok(TRACKABLE_PAGE.to_string())),
        ]);

        let report = tracker.track_awb("12345678901").await.unwrap();
        assert_eq!(report.source_url, third);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_last_error_and_direct_link() {
        let [first, second, third] = candidates("12345678901");
        let tracker = tracker(vec![
            (first.clone(), network_error(&first)),
            (second.clone(), Ok("<p>No records found</p>".to_string())),
            (
                third.clone(),
                Err(TrackingError::HttpStatus {
                    url: third.clone(),
                    status: 503,
                }),
            ),
        ]);

        let err = tracker.track_awb("12345678901").await.unwrap_err();

        let TrackingError::AllCandidatesExhausted {
            tried,
            last_error,
            direct_tracking_url,
            ..
        } = &err
        else {
            panic!("expected exhaustion, got {err:?}");
        };
        assert_eq!(*tried, 3);
        assert!(matches!(**last_error, TrackingError::HttpStatus { status: 503, .. }));
        assert_eq!(direct_tracking_url, &first);

        let message = err.to_string();
        assert!(message.contains("HTTP 503"), "{message}");
        assert!(!message.contains("connection refused"), "{message}");
        assert!(message.contains(&first), "{message}");
    }

    #[tokio::test]
    async fn test_track_wraps_exhaustion_into_failure_payload() {
        let tracker = tracker(Vec::new());

        let failure = tracker.track("12345678901").await.unwrap_err();

        assert_eq!(failure.kind, FailureKind::AllCandidatesExhausted);
        assert_eq!(failure.awb, "12345678901");
        assert_eq!(failure.tracking_url, candidates("12345678901")[0]);
        assert!(failure.message.contains("unexpected URL"));
    }

    #[test]
    fn test_direct_tracking_url_is_pure_and_normalized() {
        let tracker = tracker(Vec::new());
        let url = tracker.direct_tracking_url("  ab-12345 ");
        assert_eq!(url, tracker.direct_tracking_url("AB-12345"));
        assert!(url.split_once('?').unwrap().1.contains("AB-12345"));
        assert!(tracker.fetcher.requests().is_empty());
    }
}
