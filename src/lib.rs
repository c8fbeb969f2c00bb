//! AWB Tracker Core Library
//!
//! This library fetches Blue Dart shipment-tracking pages by AWB number,
//! extracts the current status, a delivery detail line and recent dated
//! events from the HTML, and reports either a normalized result or a
//! descriptive failure with a manual tracking link.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`tracking`] - Candidate URLs, page fetching, extraction and orchestration
//! - [`config`] - Timeouts, base URL and User-Agent for the tracker

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod tracking;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use config::{
    ConfigError, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
    TrackerConfig,
};
pub use tracking::{
    AwbNumber, FailureKind, HttpFetcher, PageFetcher, STATUS_PLACEHOLDER, Tracker,
    TrackingEndpoints, TrackingError, TrackingFailure, TrackingReport, TrackingResult,
    normalize_awb, parse_tracking_html,
};
