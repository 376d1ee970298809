//! Decides whether an HTTP response is a usable image.
//!
//! Rules, applied in order:
//! 1. status must be exactly 200
//! 2. `Content-Type` must contain `image`, or failing that `octet-stream`
//!    (case-insensitive; some hosts mislabel image payloads)
//! 3. a parseable `Content-Length` must be at least [`MIN_IMAGE_BYTES`];
//!    without one, the fetched body must be at least that long

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderName};
use thiserror::Error;

use crate::download::DownloadError;
use crate::download::constants::MIN_IMAGE_BYTES;

/// Snapshot of a completed HTTP response, detached from the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResponse {
    /// HTTP status code after redirects.
    pub status: u16,
    /// Raw `Content-Type` header, if present and valid UTF-8.
    pub content_type: Option<String>,
    /// Raw `Content-Length` header, if present and valid UTF-8.
    pub content_length: Option<String>,
    /// Full response body.
    pub body: Vec<u8>,
}

impl ImageResponse {
    /// Reads the response body and captures the headers the classifier needs.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Network`] or [`DownloadError::Timeout`] if the
    /// body cannot be read to completion.
    pub async fn read(url: &str, response: reqwest::Response) -> Result<Self, DownloadError> {
        let status = response.status().as_u16();
        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let content_length = header(CONTENT_LENGTH);
        let body = response
            .bytes()
            .await
            .map_err(|e| DownloadError::from_request(url, e))?
            .to_vec();

        Ok(Self {
            status,
            content_type,
            content_length,
            body,
        })
    }

    /// `Content-Type` header, or the empty string when absent.
    #[must_use]
    pub fn content_type_or_empty(&self) -> &str {
        self.content_type.as_deref().unwrap_or("")
    }
}

/// Why a response was not accepted as an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Status code other than 200.
    #[error("status {0} is not 200")]
    Status(u16),

    /// Content type names neither an image nor an octet stream.
    #[error("content type {0:?} is not an image")]
    ContentType(String),

    /// Declared or actual size under the threshold.
    #[error("{bytes} bytes is below the {MIN_IMAGE_BYTES}-byte minimum")]
    TooSmall {
        /// The size that was checked.
        bytes: u64,
    },
}

/// Applies the classifier rules, returning the first rule that fails.
///
/// # Errors
///
/// Returns the [`Rejection`] naming the failed rule.
pub fn classify(response: &ImageResponse) -> Result<(), Rejection> {
    if response.status != 200 {
        return Err(Rejection::Status(response.status));
    }

    let content_type = response.content_type_or_empty().to_ascii_lowercase();
    if !content_type.contains("image") && !content_type.contains("octet-stream") {
        return Err(Rejection::ContentType(
            response.content_type_or_empty().to_string(),
        ));
    }

    let declared = response
        .content_length
        .as_deref()
        .and_then(|v| v.trim().parse::<u64>().ok());
    let bytes = declared.unwrap_or(response.body.len() as u64);
    if bytes < MIN_IMAGE_BYTES {
        return Err(Rejection::TooSmall { bytes });
    }

    Ok(())
}

/// Returns `true` when the response passes every classifier rule.
#[must_use]
pub fn is_usable_image(response: &ImageResponse) -> bool {
    classify(response).is_ok()
}
