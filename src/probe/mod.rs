//! Candidate URL probing.
//!
//! - [`template`] renders a candidate URL from a timestamp
//! - [`prober`] fetches a candidate and reports a [`ProbeOutcome`]
//! - [`classify`] decides whether a fetched response is a usable image

pub mod classify;
mod prober;
mod template;

pub use classify::{ImageResponse, Rejection, classify, is_usable_image};
pub use prober::{HttpProber, Probe, ProbeFailure, ProbeOutcome};
pub use template::{PLACEHOLDER, UrlTemplate};
