//! HTTP client wrapper shared by the prober and the downloader.
//!
//! Every request carries the browser header set from [`crate::user_agent`],
//! follows redirects, and is bounded by a single per-request timeout.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::{Client, Method, Response};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{DOWNLOAD_TIMEOUT, PROBE_TIMEOUT};
use super::error::DownloadError;
use crate::user_agent::{BROWSER_USER_AGENT, DEFAULT_REFERER, IMAGE_ACCEPT};

/// Maximum redirect hops followed per request.
const MAX_REDIRECTS: usize = 10;

/// HTTP client with browser-like default headers.
///
/// Cloning is cheap and shares the connection pool, so a probe's lightweight
/// check and its full fetch reuse connections.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client with the given per-request timeout and Referer value.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidHeader`] if `referer` is not a valid
    /// header value, or [`DownloadError::Client`] if the client cannot be built.
    pub fn new(timeout: Duration, referer: &str) -> Result<Self, DownloadError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(IMAGE_ACCEPT));
        headers.insert(
            REFERER,
            HeaderValue::from_str(referer)
                .map_err(|_| DownloadError::invalid_header("Referer", referer))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .build()
            .map_err(|source| DownloadError::Client { source })?;

        Ok(Self { client, timeout })
    }

    /// Client for probing candidates (8s timeout, default Referer).
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the client cannot be built.
    pub fn for_probing() -> Result<Self, DownloadError> {
        Self::new(PROBE_TIMEOUT, DEFAULT_REFERER)
    }

    /// Client for the final download (15s timeout, default Referer).
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the client cannot be built.
    pub fn for_download() -> Result<Self, DownloadError> {
        Self::new(DOWNLOAD_TIMEOUT, DEFAULT_REFERER)
    }

    /// The per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issues a metadata-only `HEAD` request.
    ///
    /// Non-success statuses are returned as responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns a [`DownloadError`] on invalid URL, network failure or timeout.
    #[instrument(level = "trace", skip(self))]
    pub async fn head(&self, url: &str) -> Result<Response, DownloadError> {
        self.send(Method::HEAD, url).await
    }

    /// Issues a full `GET` request.
    ///
    /// Non-success statuses are returned as responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns a [`DownloadError`] on invalid URL, network failure or timeout.
    #[instrument(level = "trace", skip(self))]
    pub async fn get(&self, url: &str) -> Result<Response, DownloadError> {
        self.send(Method::GET, url).await
    }

    async fn send(&self, method: Method, url: &str) -> Result<Response, DownloadError> {
        let parsed = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
        let response = self
            .client
            .request(method.clone(), parsed)
            .send()
            .await
            .map_err(|e| DownloadError::from_request(url, e))?;
        debug!(
            %method,
            status = response.status().as_u16(),
            final_url = %response.url(),
            "response received"
        );
        Ok(response)
    }
}
