//! Top-level favicon discovery for a URL
//!
//! `FaviconFinder` fetches the page, walking the URL variants of
//! [`AttemptState`] until one yields a convincing set of icons, and then
//! drops icons whose URL does not answer.

pub mod attempt;

pub use attempt::{is_single_shortcut_icon, AttemptState};

use futures::future::join_all;

use crate::config::FinderConfig;
use crate::extractor::MarkupIconExtractor;
use crate::icon::IconCandidate;
use crate::ranker::IconRanker;
use crate::utils::{is_relative_url, make_url_absolute, ACCEPT_HTML, ACCEPT_IMAGE, MAX_PAGE_ATTEMPTS};
use crate::web::{RequestOptions, WebClient};

/// Finds every icon a web page declares or serves from a standard location
pub struct FaviconFinder<C> {
    client: C,
    config: FinderConfig,
}

impl<C: WebClient> FaviconFinder<C> {
    #[must_use]
    pub fn new(client: C, config: FinderConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Icons of the page at `url`
    ///
    /// `url` may lack a scheme (`example.com`), in which case `https://` and,
    /// if needed, `www.` are tried. Failures never surface: a site that can't
    /// be reached yields an empty list.
    pub async fn extract_favicons(&self, url: &str) -> Vec<IconCandidate> {
        let favicons = self.fetch_and_extract(url.trim()).await;

        self.verify(favicons).await
    }

    /// Like [`extract_favicons`](Self::extract_favicons), with sizes measured by `ranker`
    ///
    /// Measuring happens before the existence check, so icons downloaded
    /// while measuring are not requested a second time.
    pub async fn extract_measured_favicons<R: WebClient>(
        &self,
        url: &str,
        ranker: &IconRanker<R>,
    ) -> Vec<IconCandidate> {
        let favicons = self.fetch_and_extract(url.trim()).await;
        let measured = ranker.resolve_sizes(&favicons).await;

        self.verify(measured).await
    }

    /// Icons declared by already fetched markup
    ///
    /// Manifest and standard-location lookups still go to the network.
    pub async fn extract_favicons_from_html(&self, page_url: &str, html: &str) -> Vec<IconCandidate> {
        MarkupIconExtractor::new(&self.client, &self.config)
            .extract(page_url, html)
            .await
    }

    async fn fetch_and_extract(&self, url: &str) -> Vec<IconCandidate> {
        let is_relative = is_relative_url(url);
        let mut state = AttemptState::default();

        for attempt in 1..=MAX_PAGE_ATTEMPTS {
            let absolute_url = make_url_absolute(url, state.append_www_dot);
            let options = RequestOptions::accepting(ACCEPT_HTML)
                .with_user_agent(self.config.user_agent_for(state.request_desktop_site));

            log::debug!(
                "Attempt {attempt}: fetching {absolute_url} (desktop site: {})",
                state.request_desktop_site
            );
            let response = self.client.get(&absolute_url, &options).await;

            let next_state = if response.successful {
                // Relative links on a redirected page resolve against where it ended up
                let page_url = if response.url.is_empty() {
                    absolute_url
                } else {
                    response.url.clone()
                };
                let html = response.body_text().unwrap_or_default();
                let favicons = self.extract_favicons_from_html(&page_url, &html).await;

                if state.accepts(&favicons, is_relative) {
                    log::debug!("Accepted {} icons from {page_url}", favicons.len());
                    return favicons;
                }

                state.after_page(is_relative)
            } else {
                log::debug!(
                    "Could not fetch {absolute_url}: status {:?}",
                    response.status
                );
                state.after_failure(is_relative, url)
            };

            match next_state {
                Some(next) => state = next,
                None => break,
            }
        }

        log::warn!("No favicons found for {url}");
        Vec::new()
    }

    async fn verify(&self, favicons: Vec<IconCandidate>) -> Vec<IconCandidate> {
        if favicons.is_empty() || !self.config.verify_icons_exist() {
            return favicons;
        }

        self.retain_existing(favicons).await
    }

    /// Drop candidates whose URL does not answer, checking all of them concurrently
    async fn retain_existing(&self, favicons: Vec<IconCandidate>) -> Vec<IconCandidate> {
        let options = RequestOptions::accepting(ACCEPT_IMAGE);

        let checks = favicons.iter().map(|favicon| {
            let options = &options;
            async move {
                favicon.image_bytes.is_some()
                    || self.client.head(&favicon.url, options).await.successful
            }
        });
        let exists = join_all(checks).await;

        favicons
            .into_iter()
            .zip(exists)
            .filter_map(|(favicon, exists)| {
                if !exists {
                    log::debug!("Dropping unreachable icon {}", favicon.url);
                }
                exists.then_some(favicon)
            })
            .collect()
    }
}
