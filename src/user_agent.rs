//! Shared request header values for probe and download HTTP clients.
//!
//! The target image host only serves payloads to browser-looking requests
//! that carry its own origin as Referer, so every request sends this set.

/// Browser User-Agent sent with every probe and download request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Accept header listing preferred image formats.
pub const IMAGE_ACCEPT: &str = "image/avif,image/webp,image/apng,image/*,*/*;q=0.8";

/// Default Referer: the origin the image host expects.
pub const DEFAULT_REFERER: &str = "https://img-preview.51jiaoxi.com/";
