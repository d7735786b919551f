//! Shared configuration constants for favicon discovery
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Desktop Chrome user agent string
///
/// Sent on the "request desktop site" attempts and to third-party favicon
/// services (Favicon Extractor rejects requests without a browser UA).
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
/// Next update: 2025-04-29 (quarterly schedule)
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Android Chrome user agent string
///
/// Used for the first page request. Many sites serve a leaner page with a
/// full touch-icon set to mobile browsers.
pub const CHROME_MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.163 Mobile Safari/537.36";

/// Accept header for page requests
pub const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Accept header for web manifest requests
pub const ACCEPT_MANIFEST: &str = "application/manifest+json,application/json;q=0.9,*/*;q=0.8";

/// Accept header for icon downloads
pub const ACCEPT_IMAGE: &str = "image/avif,image/webp,image/apng,image/*,*/*;q=0.8";

/// Default per-request timeout: 30 seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of redirects followed per request
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Maximum size for icon downloads during size probing (bytes)
///
/// Typical icons: 1-200KB, Open Graph images: 100KB-2MB
pub const DEFAULT_MAX_ICON_BYTES: usize = 5 * 1024 * 1024;

/// Default minimum edge length for best-icon selection
pub const DEFAULT_MIN_ICON_SIZE: u32 = 32;

/// Default favicon path probed at the site root
pub const DEFAULT_FAVICON_PATH: &str = "favicon.ico";

/// Android Chrome icon paths, probed in this order
pub const ANDROID_CHROME_ICON_PATHS: [&str; 2] =
    ["android-chrome-192x192.png", "android-chrome-512x512.png"];

/// Apple touch icon path
pub const APPLE_TOUCH_ICON_PATH: &str = "apple-touch-icon.png";

/// Upper bound of page requests made by the fetch state machine
pub const MAX_PAGE_ATTEMPTS: usize = 4;
