//! Saves a confirmed image URL to disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use url::Url;

use super::client::HttpClient;
use super::error::DownloadError;
use super::filename::filename_for_url;
use crate::probe::{ImageResponse, classify};

/// Re-fetches confirmed URLs and writes them to a directory.
///
/// The body is always fetched again; bytes seen while probing are not reused,
/// so a URL that stopped serving an image is reported rather than saved.
#[derive(Debug, Clone)]
pub struct ImageDownloader {
    client: HttpClient,
}

impl ImageDownloader {
    /// Creates a downloader using `client` for the fetch.
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Fetches `url`, checks it is a usable image, and writes it under `output_dir`.
    ///
    /// `output_dir` (and its parents) is created if missing. An existing file
    /// with the same name is overwritten.
    ///
    /// # Returns
    ///
    /// The path of the saved file.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The response is not a usable image (nothing is written)
    /// - Creating the directory or writing the file fails
    #[instrument(skip(self), fields(url = %url, dir = %output_dir.display()))]
    pub async fn save(&self, url: &str, output_dir: &Path) -> Result<PathBuf, DownloadError> {
        let parsed = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| DownloadError::io(output_dir, e))?;

        let response = self.client.get(url).await?;
        let image = ImageResponse::read(url, response).await?;
        if let Err(reason) = classify(&image) {
            return Err(DownloadError::not_an_image(
                url,
                image.status,
                image.content_type_or_empty(),
                reason,
            ));
        }

        let file_path = output_dir.join(filename_for_url(&parsed));
        debug!(path = %file_path.display(), bytes = image.body.len(), "writing image");
        tokio::fs::write(&file_path, &image.body)
            .await
            .map_err(|e| DownloadError::io(file_path.clone(), e))?;

        info!(path = %file_path.display(), bytes = image.body.len(), "image saved");
        Ok(file_path)
    }
}
