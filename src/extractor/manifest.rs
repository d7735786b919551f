//! Icons declared in a web app manifest

use serde::Deserialize;

use crate::errors::{FaviconError, FaviconResult};
use crate::icon::{create_favicon_from_sizes_string, IconCandidate, IconType};
use crate::utils::ACCEPT_MANIFEST;
use crate::web::{RequestOptions, WebClient};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The part of a web app manifest that declares icons
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebManifest {
    #[serde(default)]
    pub icons: Vec<WebManifestIcon>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebManifestIcon {
    pub src: Option<String>,
    pub sizes: Option<String>,
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
    pub purpose: Option<String>,
}

impl WebManifestIcon {
    /// Maskable icons have safe-zone padding and are cropped by the launcher
    #[must_use]
    pub fn is_maskable(&self) -> bool {
        self.purpose
            .as_deref()
            .is_some_and(|purpose| purpose.to_ascii_lowercase().contains("maskable"))
    }
}

/// Decode manifest bytes, tolerating a leading UTF-8 byte order mark
///
/// # Errors
///
/// Returns `FaviconError::ManifestDecode` if the bytes are not a JSON object
/// with the expected shape.
pub fn decode_manifest(bytes: &[u8]) -> FaviconResult<WebManifest> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    Ok(serde_json::from_slice(bytes)?)
}

/// Map the icons of a decoded manifest to candidates
///
/// Sources starting with `.` are relative to the manifest itself, everything
/// else to the page. Entries without `src` are skipped.
#[must_use]
pub fn icons_from_manifest(
    manifest: &WebManifest,
    manifest_url: &str,
    page_url: &str,
) -> Vec<IconCandidate> {
    manifest
        .icons
        .iter()
        .filter_map(|icon| {
            let src = icon.src.as_deref()?;
            let base_url = if src.starts_with('.') {
                manifest_url
            } else {
                page_url
            };
            let icon_type = if icon.is_maskable() {
                IconType::AndroidChromeMaskable
            } else {
                IconType::AndroidChrome
            };

            create_favicon_from_sizes_string(
                Some(src),
                base_url,
                icon_type,
                icon.mime_type.as_deref(),
                icon.sizes.as_deref(),
                None,
            )
        })
        .collect()
}

/// Fetches a manifest and turns its icons into candidates
pub struct ManifestIconExtractor<'a, C> {
    client: &'a C,
}

impl<'a, C: WebClient> ManifestIconExtractor<'a, C> {
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Icons of the manifest at `manifest_url`, declared for the page at `page_url`
    ///
    /// Fetch and decode failures are logged and yield no icons.
    pub async fn extract(&self, manifest_url: &str, page_url: &str) -> Vec<IconCandidate> {
        match self.fetch_manifest(manifest_url).await {
            Ok(manifest) => {
                let icons = icons_from_manifest(&manifest, manifest_url, page_url);
                log::debug!("Found {} icons in manifest {manifest_url}", icons.len());
                icons
            }
            Err(e) if e.is_transport() => {
                log::debug!("Could not fetch web manifest {manifest_url}: {e}");
                Vec::new()
            }
            Err(e) => {
                log::warn!("Could not read icons from web manifest {manifest_url}: {e}");
                Vec::new()
            }
        }
    }

    async fn fetch_manifest(&self, manifest_url: &str) -> FaviconResult<WebManifest> {
        let response = self
            .client
            .get(manifest_url, &RequestOptions::accepting(ACCEPT_MANIFEST))
            .await;

        if !response.successful {
            return Err(FaviconError::UnsuccessfulStatus {
                url: manifest_url.to_string(),
                status: response.status.unwrap_or_default(),
            });
        }

        let body = response
            .body
            .filter(|body| !body.is_empty())
            .ok_or_else(|| FaviconError::EmptyBody(manifest_url.to_string()))?;

        decode_manifest(&body)
    }
}
