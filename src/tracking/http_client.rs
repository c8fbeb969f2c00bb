//! HTTP client construction policy for tracking requests.
//!
//! Timeouts, User-Agent and compression come from [`TrackerConfig`] so every
//! candidate fetch behaves the same way.

use std::panic::{AssertUnwindSafe, catch_unwind};

use reqwest::{Client, ClientBuilder};
use tracing::warn;

use crate::config::TrackerConfig;

use super::TrackingError;

/// Builds the tracking HTTP client from `config`.
///
/// # Errors
///
/// Returns [`TrackingError::HttpClient`] when client construction fails.
pub fn build_tracking_http_client(config: &TrackerConfig) -> Result<Client, TrackingError> {
    match try_build_client(config, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some sandboxed environments panic when querying system proxy
            // settings; retry without the system lookup.
            warn!("Tracking client hit system proxy panic; building without proxy lookup");
            match try_build_client(config, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(TrackingError::HttpClient {
                    reason: "client construction panicked while initializing networking"
                        .to_string(),
                }),
                Err(BuildClientFailure::Build(error)) => Err(TrackingError::HttpClient {
                    reason: error.to_string(),
                }),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(TrackingError::HttpClient {
            reason: error.to_string(),
        }),
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(
    config: &TrackerConfig,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(|| {
        let mut builder = base_builder(config);
        if disable_system_proxy_lookup {
            builder = builder.no_proxy();
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(config: &TrackerConfig) -> ClientBuilder {
    Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .gzip(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_from_default_config() {
        assert!(build_tracking_http_client(&TrackerConfig::default()).is_ok());
    }
}
