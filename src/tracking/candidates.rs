//! Candidate tracking URLs for an AWB.
//!
//! Three page variants are tried in a fixed order: the direct result page,
//! the human-facing tracking page, and the third-party result page.

use url::form_urlencoded;

use super::identifier::AwbNumber;

/// Production host for Blue Dart tracking pages.
pub const DEFAULT_BASE_URL: &str = "https://www.bluedart.com";

const DIRECT_RESULT_PATH: &str = "/web/guest/trackdartresult";
const TRACKING_PAGE_PATH: &str = "/tracking";
const THIRD_PARTY_RESULT_PATH: &str = "/web/guest/trackdartresultthirdparty";

/// Host used to build candidate and direct tracking URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingEndpoints {
    base_url: String,
}

impl TrackingEndpoints {
    /// Creates endpoints rooted at `base_url` (trailing slashes are ignored).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the manual-tracking link shown to users.
    ///
    /// Pure; accepts any string so it can be shown even for rejected input.
    /// The AWB is form-encoded, so a validated AWB appears verbatim.
    #[must_use]
    pub fn direct_tracking_url(&self, awb: &str) -> String {
        format!(
            "{}{DIRECT_RESULT_PATH}?{}",
            self.base_url,
            track_query(awb)
        )
    }

    /// Builds the ordered candidate URLs for a validated AWB.
    #[must_use]
    pub fn candidate_urls(&self, awb: &AwbNumber) -> [String; 3] {
        let awb = awb.as_str();
        [
            self.direct_tracking_url(awb),
            format!(
                "{}{TRACKING_PAGE_PATH}?{}",
                self.base_url,
                form_urlencoded::Serializer::new(String::new())
                    .append_pair("tracking_no", awb)
                    .finish()
            ),
            format!(
                "{}{THIRD_PARTY_RESULT_PATH}?{}",
                self.base_url,
                track_query(awb)
            ),
        ]
    }
}

impl Default for TrackingEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn track_query(awb: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("trackFor", "0")
        .append_pair("trackNo", awb)
        .finish()
}
