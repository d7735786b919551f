//! Favicon discovery for web pages
//!
//! Fetches a page, collects every icon its markup, web manifest and the
//! well-known icon paths offer, and optionally picks the best one for a
//! target size. Third-party favicon services serve as a fallback source.
//!
//! ```no_run
//! # async fn run() -> kodegen_tools_favicon::FaviconResult<()> {
//! use kodegen_tools_favicon::{find_best_favicon, FinderConfig, RankCriteria};
//!
//! let config = FinderConfig::builder().probe_touch_icons(true).build()?;
//! let best = find_best_favicon("github.com", &config, &RankCriteria::default().max_size(256)).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod extractor;
pub mod favicon_service;
pub mod finder;
pub mod icon;
pub mod ranker;
pub mod utils;
pub mod web;

pub use config::{FinderConfig, FinderConfigBuilder};
pub use errors::{FaviconError, FaviconResult};
pub use extractor::{ManifestIconExtractor, MarkupIconExtractor, StandardLocationProbe};
pub use favicon_service::{FaviconExtractorApi, FaviconService, FaviconServiceGateway, ServiceIcon};
pub use finder::{AttemptState, FaviconFinder};
pub use icon::{IconCandidate, IconType, Size};
pub use ranker::{IconRanker, RankCriteria};
pub use web::{ReqwestWebClient, RequestOptions, WebClient, WebResponse};

/// All icons of the page at `url`, using a fresh HTTP client
///
/// # Errors
///
/// Only fails if the HTTP client can't be built. Unreachable sites yield an
/// empty list.
pub async fn find_favicons(url: &str, config: &FinderConfig) -> FaviconResult<Vec<IconCandidate>> {
    let client = ReqwestWebClient::new(config)?;
    let finder = FaviconFinder::new(client, config.clone());

    Ok(finder.extract_favicons(url).await)
}

/// The best icon of the page at `url` for `criteria`
///
/// Sizes are measured before dead icons are dropped, so every icon is
/// downloaded at most once.
///
/// # Errors
///
/// Only fails if the HTTP client can't be built.
pub async fn find_best_favicon(
    url: &str,
    config: &FinderConfig,
    criteria: &RankCriteria,
) -> FaviconResult<Option<IconCandidate>> {
    let client = ReqwestWebClient::new(config)?;
    let finder = FaviconFinder::new(client.clone(), config.clone());
    let ranker = IconRanker::new(client, config);

    let favicons = finder.extract_measured_favicons(url, &ranker).await;

    Ok(crate::ranker::rank(&favicons, criteria).cloned())
}
