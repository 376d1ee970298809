//! Stampscan Core Library
//!
//! Finds the first URL in a numeric timestamp range that serves a usable
//! image, then downloads it.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`probe`] - URL templating, per-candidate probing, response classification
//! - [`search`] - Ordered candidate scan with pacing and backoff
//! - [`download`] - HTTP client and image saving
//! - [`scenario`] - A complete run: search, then save

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod probe;
pub mod scenario;
pub mod search;
pub mod user_agent;

// Re-export commonly used types
pub use download::{DownloadError, HttpClient, ImageDownloader};
pub use probe::{
    HttpProber, ImageResponse, Probe, ProbeFailure, ProbeOutcome, Rejection, UrlTemplate,
    is_usable_image,
};
pub use scenario::{Scenario, ScenarioOutcome, run_scenario};
pub use search::{PacingPolicy, SearchHit, SearchParams, Sleeper, TokioSleeper, find_first_valid};
