//! Existence checks against well-known icon paths
//!
//! Sites that declare nothing in their markup often still serve `/favicon.ico`
//! or the file names popularized by favicon generators. A subdomain without
//! the file gets a second chance at its parent domain.

use url::Url;

use crate::errors::FaviconResult;
use crate::icon::{contains_icon_with_url, create_favicon, IconCandidate, IconType};
use crate::utils::url_utils::{host_root, parent_domain};
use crate::utils::{
    ACCEPT_IMAGE, ANDROID_CHROME_ICON_PATHS, APPLE_TOUCH_ICON_PATH, DEFAULT_FAVICON_PATH,
};
use crate::web::{RequestOptions, WebClient};

pub struct StandardLocationProbe<'a, C> {
    client: &'a C,
}

impl<'a, C: WebClient> StandardLocationProbe<'a, C> {
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// `<root>/favicon.ico`
    pub async fn find_default_favicon(
        &self,
        site_url: &str,
        known: &[IconCandidate],
    ) -> Option<IconCandidate> {
        self.probe(site_url, known, DEFAULT_FAVICON_PATH, IconType::ShortcutIcon)
            .await
    }

    /// `<root>/android-chrome-192x192.png`, then `<root>/android-chrome-512x512.png`
    pub async fn find_android_chrome_icon(
        &self,
        site_url: &str,
        known: &[IconCandidate],
    ) -> Option<IconCandidate> {
        for path_name in ANDROID_CHROME_ICON_PATHS {
            if let Some(icon) = self
                .probe(site_url, known, path_name, IconType::AndroidChrome)
                .await
            {
                return Some(icon);
            }
        }

        None
    }

    /// `<root>/apple-touch-icon.png`
    pub async fn find_apple_touch_icon(
        &self,
        site_url: &str,
        known: &[IconCandidate],
    ) -> Option<IconCandidate> {
        self.probe(site_url, known, APPLE_TOUCH_ICON_PATH, IconType::AppleTouch)
            .await
    }

    /// Check whether `path_name` exists at the root of `site_url`'s host
    ///
    /// Returns `None` without a request when `known` already holds the URL.
    /// A response only counts if it is successful and does not report a
    /// non-image content type, since many sites answer unknown paths with a
    /// 200 HTML error page. On a miss, subdomains are retried once at their
    /// parent domain.
    pub async fn probe(
        &self,
        site_url: &str,
        known: &[IconCandidate],
        path_name: &str,
        icon_type: IconType,
    ) -> Option<IconCandidate> {
        let roots = match probe_roots(site_url) {
            Ok(roots) => roots,
            Err(e) => {
                log::debug!("Cannot probe {path_name} for '{site_url}': {e}");
                return None;
            }
        };

        for root in roots {
            let icon_url = format!("{root}/{path_name}");

            if contains_icon_with_url(known, &icon_url) {
                return None;
            }

            let response = self
                .client
                .head(&icon_url, &RequestOptions::accepting(ACCEPT_IMAGE))
                .await;

            if response.successful && response.has_image_content_type() {
                log::debug!("Found {icon_type} at standard location {icon_url}");
                return create_favicon(
                    Some(&icon_url),
                    &icon_url,
                    icon_type,
                    response
                        .content_type
                        .as_deref()
                        .filter(|content_type| content_type.starts_with("image/")),
                    None,
                    None,
                );
            }

            log::debug!(
                "No icon at {icon_url} (status {:?}, content type {:?})",
                response.status,
                response.content_type
            );
        }

        None
    }
}

/// Site root of `site_url`, followed by its parent domain root for subdomains
fn probe_roots(site_url: &str) -> FaviconResult<Vec<String>> {
    let url = Url::parse(site_url)?;

    let mut roots = Vec::with_capacity(2);
    roots.extend(host_root(&url));
    roots.extend(parent_domain(&url).map(|domain| match url.port() {
        Some(port) => format!("{}://{domain}:{port}", url.scheme()),
        None => format!("{}://{domain}", url.scheme()),
    }));

    Ok(roots)
}
