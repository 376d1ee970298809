//! Constants for the download module (timeouts, size thresholds).

use std::time::Duration;

/// Per-request timeout while probing candidate URLs (8 seconds).
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(8);

/// Per-request timeout for the final image download (15 seconds).
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Responses smaller than this many bytes are treated as empty placeholders.
pub const MIN_IMAGE_BYTES: u64 = 128;

/// Default directory that receives saved images.
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";
