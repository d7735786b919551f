//! Icons declared in the `<head>` of an HTML page
//!
//! Extraction happens in two phases. `parse_head_tags` snapshots every `link`
//! and `meta` element of the head into plain [`HeadTag`] values, so the parsed
//! document (which is not `Send`) is gone before anything is awaited. The pure
//! mapping in `map_tags_to_candidates` then classifies the tags.
//!
//! Conventions covered:
//!
//! - `<link rel="icon">`, `<link rel="shortcut icon">`
//! - `<link rel="apple-touch-icon">`, `<link rel="apple-touch-icon-precomposed">`
//! - `<link rel="mask-icon" color="...">` (Safari pinned tabs)
//! - `<meta property="og:image">` with `og:image:type/width/height` siblings
//! - `<meta name="msapplication-TileImage">` with a `msapplication-TileColor` sibling
//! - `<link rel="manifest">`, followed to the manifest's icon list

use lazy_static::lazy_static;
use scraper::{Html, Selector};

use super::manifest::ManifestIconExtractor;
use super::standard_location::StandardLocationProbe;
use crate::config::FinderConfig;
use crate::icon::{
    create_favicon, create_favicon_from_sizes_string, merge_unique, IconCandidate, IconType,
    Size,
};
use crate::utils::make_link_absolute;
use crate::web::WebClient;

lazy_static! {
    // Hardcoded and syntactically valid; a parse failure is a compile-time bug.
    static ref HEAD_TAG_SELECTOR: Selector = Selector::parse("head link, head meta")
        .expect("BUG: hardcoded CSS selector 'head link, head meta' is invalid");
}

const INLINE_DATA_PREFIX: &str = "data:;base64";
const JS_SITE_FAVICON_CLASS: &str = "js-site-favicon";

/// Snapshot of a `link` or `meta` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadTag {
    /// Lowercased element name
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl HeadTag {
    /// Attribute value by case-insensitive name
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// `rel` lowercased with runs of whitespace collapsed to one space
    fn normalized_rel(&self) -> Option<String> {
        self.attr("rel").map(|rel| {
            rel.split_whitespace()
                .map(str::to_ascii_lowercase)
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    /// `property` of Open Graph tags, falling back to `name` for sites that misuse it
    fn meta_key(&self) -> Option<&str> {
        self.attr("property").or_else(|| self.attr("name"))
    }

    fn is_link(&self) -> bool {
        self.name == "link"
    }

    fn is_meta(&self) -> bool {
        self.name == "meta"
    }
}

/// Every `link` and `meta` element inside the document head, in document order
#[must_use]
pub fn parse_head_tags(html: &str) -> Vec<HeadTag> {
    let document = Html::parse_document(html);

    document
        .select(&HEAD_TAG_SELECTOR)
        .map(|element| {
            let value = element.value();
            HeadTag {
                name: value.name().to_ascii_lowercase(),
                attributes: value
                    .attrs()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
            }
        })
        .collect()
}

/// Map head tags to candidates, at most one per tag
///
/// Unrecognized tags, inline data icons and links without `href` are skipped.
/// The result is not deduplicated.
#[must_use]
pub fn map_tags_to_candidates(page_url: &str, tags: &[HeadTag]) -> Vec<IconCandidate> {
    tags.iter()
        .filter_map(|tag| {
            if tag.is_link() {
                map_link_tag(page_url, tag)
            } else if tag.is_meta() {
                map_meta_tag(page_url, tag, tags)
            } else {
                None
            }
        })
        .collect()
}

/// Absolute URL of the first `<link rel="manifest">` with a non-blank `href`
#[must_use]
pub fn manifest_url(page_url: &str, tags: &[HeadTag]) -> Option<String> {
    tags.iter()
        .filter(|tag| tag.is_link() && tag.normalized_rel().as_deref() == Some("manifest"))
        .find_map(|tag| tag.attr("href").filter(|href| !href.trim().is_empty()))
        .map(|href| make_link_absolute(href.trim(), page_url))
}

fn link_icon_type(tag: &HeadTag) -> Option<IconType> {
    let icon_type = match tag.normalized_rel()?.as_str() {
        "icon" if has_class(tag, JS_SITE_FAVICON_CLASS) => IconType::JsSiteFavicon,
        "icon" => IconType::Icon,
        "shortcut icon" => IconType::ShortcutIcon,
        "apple-touch-icon" => IconType::AppleTouch,
        "apple-touch-icon-precomposed" => IconType::AppleTouchPrecomposed,
        "mask-icon" => IconType::SafariMaskIcon,
        _ => return None,
    };

    Some(icon_type)
}

fn has_class(tag: &HeadTag, class: &str) -> bool {
    tag.attr("class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

fn map_link_tag(page_url: &str, tag: &HeadTag) -> Option<IconCandidate> {
    let icon_type = link_icon_type(tag)?;
    let href = tag.attr("href").map(str::trim).filter(|href| !href.is_empty())?;

    if href.starts_with(INLINE_DATA_PREFIX) {
        log::debug!("Skipping inline {icon_type} on {page_url}");
        return None;
    }

    let color = tag.attr("color").filter(|_| icon_type.supports_color());

    create_favicon_from_sizes_string(
        Some(href),
        page_url,
        icon_type,
        non_blank(tag.attr("type")),
        tag.attr("sizes"),
        color,
    )
}

fn map_meta_tag(page_url: &str, tag: &HeadTag, tags: &[HeadTag]) -> Option<IconCandidate> {
    let key = tag.meta_key()?;

    if key.eq_ignore_ascii_case("og:image") {
        let content = tag.attr("content")?;
        let mime_type = sibling_content(tags, "og:image:type");
        let width = sibling_content(tags, "og:image:width").and_then(parse_dimension);
        let height = sibling_content(tags, "og:image:height").and_then(parse_dimension);
        let size = width.zip(height).map(|(width, height)| Size::new(width, height));

        create_favicon(
            Some(content),
            page_url,
            IconType::OpenGraphImage,
            non_blank(mime_type),
            size,
            None,
        )
    } else if key.eq_ignore_ascii_case("msapplication-TileImage") {
        let content = tag.attr("content")?;
        let color = sibling_content(tags, "msapplication-TileColor");

        create_favicon(
            Some(content),
            page_url,
            IconType::MsTileImage,
            None,
            None,
            non_blank(color),
        )
    } else {
        None
    }
}

/// `content` of the first meta tag whose property or name is `key`
fn sibling_content<'t>(tags: &'t [HeadTag], key: &str) -> Option<&'t str> {
    tags.iter()
        .filter(|tag| tag.is_meta())
        .find(|tag| tag.meta_key().is_some_and(|k| k.eq_ignore_ascii_case(key)))
        .and_then(|tag| tag.attr("content"))
}

fn parse_dimension(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Extracts every icon a page declares, plus what its manifest and the
/// standard locations add
pub struct MarkupIconExtractor<'a, C> {
    client: &'a C,
    config: &'a FinderConfig,
}

impl<'a, C: WebClient> MarkupIconExtractor<'a, C> {
    #[must_use]
    pub fn new(client: &'a C, config: &'a FinderConfig) -> Self {
        Self { client, config }
    }

    /// All icons for the page at `page_url` with markup `html`
    ///
    /// The manifest and the standard-location probes run concurrently. Their
    /// results are merged after the markup icons in one pass; the first
    /// candidate seen for a URL is kept.
    pub async fn extract(&self, page_url: &str, html: &str) -> Vec<IconCandidate> {
        let tags = parse_head_tags(html);
        let markup_icons = map_tags_to_candidates(page_url, &tags);
        let manifest_url = manifest_url(page_url, &tags);

        let manifest_icons = async {
            match manifest_url {
                Some(manifest_url) => {
                    ManifestIconExtractor::new(self.client)
                        .extract(&manifest_url, page_url)
                        .await
                }
                None => Vec::new(),
            }
        };
        let probed_icons = self.probe_standard_locations(page_url, &markup_icons);

        let (manifest_icons, probed_icons) = futures::join!(manifest_icons, probed_icons);

        let mut candidates = Vec::with_capacity(markup_icons.len() + manifest_icons.len());
        merge_unique(&mut candidates, markup_icons);
        merge_unique(&mut candidates, manifest_icons);
        merge_unique(&mut candidates, probed_icons);

        log::debug!("Extracted {} icons from {page_url}", candidates.len());
        candidates
    }

    async fn probe_standard_locations(
        &self,
        page_url: &str,
        known: &[IconCandidate],
    ) -> Vec<IconCandidate> {
        let probe = StandardLocationProbe::new(self.client);

        let default_favicon = async {
            if self.config.probe_default_favicon() {
                probe.find_default_favicon(page_url, known).await
            } else {
                None
            }
        };
        let touch_icons = async {
            if self.config.probe_touch_icons() {
                let (android_chrome, apple_touch) = futures::join!(
                    probe.find_android_chrome_icon(page_url, known),
                    probe.find_apple_touch_icon(page_url, known)
                );
                vec![android_chrome, apple_touch]
            } else {
                Vec::new()
            }
        };

        let (default_favicon, touch_icons) = futures::join!(default_favicon, touch_icons);

        default_favicon
            .into_iter()
            .chain(touch_icons.into_iter().flatten())
            .collect()
    }
}
