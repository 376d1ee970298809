//! Confirms whether a single candidate URL serves a usable image.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument, trace};

use super::classify::{ImageResponse, Rejection, classify};
use crate::download::HttpClient;

/// Result of probing one candidate URL.
#[derive(Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The URL answered with a usable image.
    Confirmed,
    /// The URL did not answer with a usable image.
    Failed(ProbeFailure),
}

impl ProbeOutcome {
    /// Whether the probe confirmed the URL.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Why a candidate was not confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    /// The full fetch failed at the network level (timeout, DNS, refused).
    #[error("request failed: {0}")]
    Network(String),

    /// The full fetch answered, but the classifier rejected it.
    #[error("rejected: {0}")]
    Rejected(Rejection),
}

/// Something that can decide whether a URL serves a usable image.
///
/// The search loop depends on this seam so it can be driven without a network.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Probes `url`. Never fails: every problem is folded into the outcome.
    async fn probe(&self, url: &str) -> ProbeOutcome;
}

/// Probes over HTTP: an optional `HEAD` check, then a classified `GET`.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: HttpClient,
    head_first: bool,
}

impl HttpProber {
    /// Creates a prober that issues a lightweight `HEAD` before the full fetch.
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            head_first: true,
        }
    }

    /// Enables or disables the lightweight `HEAD` check.
    #[must_use]
    pub fn with_head_first(mut self, head_first: bool) -> Self {
        self.head_first = head_first;
        self
    }

    /// Whether the lightweight check is enabled.
    #[must_use]
    pub fn head_first(&self) -> bool {
        self.head_first
    }

    async fn fetch_and_classify(&self, url: &str) -> ProbeOutcome {
        let fetched = match self.client.get(url).await {
            Ok(response) => ImageResponse::read(url, response).await,
            Err(e) => Err(e),
        };
        match fetched {
            Ok(response) => match classify(&response) {
                Ok(()) => ProbeOutcome::Confirmed,
                Err(rejection) => {
                    trace!(%rejection, "candidate rejected");
                    ProbeOutcome::Failed(ProbeFailure::Rejected(rejection))
                }
            },
            Err(e) => {
                trace!(error = %e, "candidate fetch failed");
                ProbeOutcome::Failed(ProbeFailure::Network(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl Probe for HttpProber {
    #[instrument(level = "debug", skip(self))]
    async fn probe(&self, url: &str) -> ProbeOutcome {
        if self.head_first {
            match self.client.head(url).await {
                Ok(response) if response.status() == StatusCode::METHOD_NOT_ALLOWED => {
                    debug!("HEAD not supported, falling back to GET");
                }
                // Any status below 400 after redirects counts as "exists".
                Ok(response) if response.status().as_u16() < 400 => {
                    return self.fetch_and_classify(url).await;
                }
                Ok(response) => {
                    trace!(status = response.status().as_u16(), "HEAD not ok, trying GET");
                }
                Err(e) => {
                    debug!(error = %e, "HEAD failed, falling back to GET");
                }
            }
        }

        self.fetch_and_classify(url).await
    }
}
