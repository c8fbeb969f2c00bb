//! Page retrieval for candidate URLs.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::config::TrackerConfig;

use super::TrackingError;
use super::http_client::build_tracking_http_client;

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Retrieves the body of a tracking page.
///
/// Implementations perform exactly one attempt per call; the tracker owns
/// the fallback across candidate URLs.
///
/// # Object Safety
///
/// Uses `async_trait` so the trait stays object-safe for `dyn PageFetcher`
/// stubs in tests and alternative transports.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its body as text.
    async fn fetch(&self, url: &str) -> Result<String, TrackingError>;
}

/// reqwest-backed [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    /// Creates a fetcher using `config` timeouts and User-Agent.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::HttpClient`] if client construction fails.
    pub fn new(config: &TrackerConfig) -> Result<Self, TrackingError> {
        Ok(Self {
            client: build_tracking_http_client(config)?,
            timeout_secs: config.timeout_secs,
        })
    }

    fn map_transport_error(&self, url: &str, error: &reqwest::Error) -> TrackingError {
        if error.is_timeout() {
            TrackingError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout_secs,
            }
        } else {
            TrackingError::network(url, error)
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, TrackingError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, HTML_ACCEPT)
            .send()
            .await
            .map_err(|e| self.map_transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackingError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(url, &e))?;
        debug!(bytes = body.len(), "Fetched tracking page");

        // Mixed encodings are common on courier pages; decode lossily.
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
