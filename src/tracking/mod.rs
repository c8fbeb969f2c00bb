//! Live shipment tracking: candidate URLs, fetching, and HTML extraction.
//!
//! # Architecture
//!
//! - [`extractor`] - Pure HTML-to-[`TrackingResult`] extraction
//! - [`TrackingEndpoints`] - Ordered candidate URLs and the direct tracking link
//! - [`PageFetcher`] - Async trait for page retrieval; [`HttpFetcher`] is the reqwest implementation
//! - [`Tracker`] - Validates the AWB and walks candidates until one parses
//! - [`TrackingReport`] / [`TrackingFailure`] - Payloads handed to collaborators
//!
//! # Example
//!
//! ```no_run
//! use awb_tracker_core::tracking::Tracker;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = Tracker::new()?;
//! match tracker.track("12345678901").await {
//!     Ok(report) => println!("{}: {}", report.awb, report.status),
//!     Err(failure) => println!("{failure} (try {})", failure.tracking_url),
//! }
//! # Ok(())
//! # }
//! ```

mod candidates;
mod error;
pub mod extractor;
mod fetcher;
mod http_client;
mod identifier;
mod report;
mod tracker;
mod utils;

pub use candidates::{DEFAULT_BASE_URL, TrackingEndpoints};
pub use error::{FailureKind, TrackingError};
pub use extractor::parse_tracking_html;
pub use fetcher::{HttpFetcher, PageFetcher};
pub use identifier::{AwbNumber, normalize_awb};
pub use report::{STATUS_PLACEHOLDER, TrackingFailure, TrackingReport};
pub use tracker::Tracker;

/// Structured data extracted from one tracking page.
///
/// Built once by the extractor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingResult {
    awb: String,
    status: Option<String>,
    details: String,
    history: Vec<String>,
    source_url: String,
}

impl TrackingResult {
    pub(crate) fn new(
        awb: impl Into<String>,
        status: Option<String>,
        details: impl Into<String>,
        history: Vec<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            awb: awb.into(),
            status,
            details: details.into(),
            history,
            source_url: source_url.into(),
        }
    }

    /// The AWB this result belongs to.
    #[must_use]
    pub fn awb(&self) -> &str {
        &self.awb
    }

    /// Current status, when the page carried a status label.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Delivery detail line, or the placeholder.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Dated history lines in page order.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// URL the page was fetched from.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}
