//! Icon lists from the Favicon Extractor JSON API
//!
//! Unlike the image endpoints of the gateway this returns every icon the
//! service knows for a site, which the ranker can then choose from.

use serde::Deserialize;

use crate::config::FinderConfig;
use crate::errors::{FaviconError, FaviconResult};
use crate::icon::{create_favicon, merge_unique, parse_size_token, IconCandidate, IconType, Size};
use crate::utils::{ensure_starts_with_http_or_https, remove_protocol_and_www};
use crate::web::{RequestOptions, WebClient};

const DEFAULT_API_BASE_URL: &str = "https://www.faviconextractor.com/api/favicon";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    icons: Vec<ApiIcon>,
}

#[derive(Debug, Deserialize)]
struct ApiIcon {
    href: String,
    sizes: Option<String>,
}

pub struct FaviconExtractorApi<C> {
    client: C,
    base_url: String,
    user_agent: String,
}

impl<C: WebClient> FaviconExtractorApi<C> {
    #[must_use]
    pub fn new(client: C, config: &FinderConfig) -> Self {
        Self {
            client,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            // The API rejects requests without a browser user agent
            user_agent: config.desktop_user_agent().to_string(),
        }
    }

    /// Point the API at another host, e.g. a self-hosted instance
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Icons the service lists for the site at `url`
    ///
    /// Failures are logged and yield an empty list.
    pub async fn find_favicons(&self, url: &str) -> Vec<IconCandidate> {
        match self.query(url).await {
            Ok(icons) => icons,
            Err(e) => {
                log::warn!("Favicon Extractor API lookup for {url} failed: {e}");
                Vec::new()
            }
        }
    }

    async fn query(&self, url: &str) -> FaviconResult<Vec<IconCandidate>> {
        let api_url = format!("{}/{}", self.base_url, remove_protocol_and_www(url));
        let options = RequestOptions::accepting("application/json")
            .with_user_agent(self.user_agent.as_str());

        let response = self.client.get(&api_url, &options).await;
        if !response.successful {
            return Err(FaviconError::UnsuccessfulStatus {
                url: api_url,
                status: response.status.unwrap_or_default(),
            });
        }

        let body = response
            .body
            .ok_or_else(|| FaviconError::EmptyBody(api_url.clone()))?;
        let parsed: ApiResponse = serde_json::from_slice(&body)?;

        let site_url = ensure_starts_with_http_or_https(url);
        let icons: Vec<IconCandidate> = parsed
            .icons
            .iter()
            .filter_map(|icon| {
                create_favicon(
                    Some(&icon.href),
                    &site_url,
                    IconType::Icon,
                    None,
                    api_size(icon.sizes.as_deref()),
                    None,
                )
            })
            .collect();

        // First entry wins for a repeated URL
        let mut candidates = Vec::with_capacity(icons.len());
        merge_unique(&mut candidates, icons);

        Ok(candidates)
    }
}

/// `"unknown"`, `"WxH"` or a single edge length like `"180"`
fn api_size(sizes: Option<&str>) -> Option<Size> {
    let sizes = sizes?.trim();

    if sizes.eq_ignore_ascii_case("unknown") {
        return None;
    }

    match sizes.parse::<u32>() {
        Ok(edge) => Some(Size::new(edge, edge)),
        Err(_) => parse_size_token(sizes),
    }
}
