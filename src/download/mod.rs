//! HTTP access and image saving.
//!
//! - [`HttpClient`] sends browser-like `HEAD`/`GET` requests with a bounded timeout
//! - [`ImageDownloader`] re-fetches a confirmed URL and writes it to disk
//!
//! # Example
//!
//! ```no_run
//! use stampscan_core::download::{HttpClient, ImageDownloader};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = ImageDownloader::new(HttpClient::for_download()?);
//! let path = downloader
//!     .save("https://img.example.com/0-1697712533700/4.jpg", Path::new("downloads"))
//!     .await?;
//! println!("Saved: {}", path.display());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;
pub mod filename;
mod saver;

pub use client::HttpClient;
pub use error::DownloadError;
pub use saver::ImageDownloader;

// No module-local Result alias: signatures spell out `Result<T, DownloadError>`.
