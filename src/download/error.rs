//! Error types for the download module.
//!
//! Probing never surfaces these to callers (failures become probe outcomes);
//! the final save step returns them so the entry point can report them.

use std::path::PathBuf;

use thiserror::Error;

use crate::probe::Rejection;

/// Errors that can occur while fetching or saving an image.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// A configured header value cannot be sent over HTTP.
    #[error("invalid {name} header value: {value:?}")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a usable image.
    #[error(
        "not an image response from {url}: HTTP {status}, content-type {content_type:?} ({reason})"
    )]
    NotAnImage {
        /// The URL that was fetched.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// The Content-Type header, empty when absent.
        content_type: String,
        /// Which classifier rule rejected the response.
        reason: Rejection,
    },

    /// File system error while saving (create directory, write, etc.)
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates an error from a reqwest send/body failure, splitting out timeouts.
    pub fn from_request(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name,
            value: value.into(),
        }
    }

    /// Creates a not-an-image error.
    pub fn not_an_image(
        url: impl Into<String>,
        status: u16,
        content_type: impl Into<String>,
        reason: Rejection,
    ) -> Self {
        Self::NotAnImage {
            url: url.into(),
            status,
            content_type: content_type.into(),
            reason,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status carried by the error, when the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotAnImage { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// url or path that the source error does not carry.
