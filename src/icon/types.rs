//! Icon candidate types

use serde::{Deserialize, Serialize};
use std::fmt;

use super::size::Size;

/// The HTML or manifest convention an icon was declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconType {
    /// `<link rel="icon">`, the primary browser favicon
    Icon,
    /// `<link rel="shortcut icon">`, legacy IE form, usually a `.ico`
    ShortcutIcon,
    /// Manifest icon with purpose `any` or no purpose
    AndroidChrome,
    /// Manifest icon with purpose `maskable`
    AndroidChromeMaskable,
    /// `<link rel="apple-touch-icon">`
    AppleTouch,
    /// `<link rel="apple-touch-icon-precomposed">`, iOS 6 and earlier
    AppleTouchPrecomposed,
    /// `<link rel="mask-icon">`, monochrome SVG for Safari pinned tabs
    SafariMaskIcon,
    /// `<meta name="msapplication-TileImage">`
    MsTileImage,
    /// `<meta property="og:image">`, social media preview image
    OpenGraphImage,
    /// `<link rel="icon" class="js-site-favicon">`, swapped by page scripts
    JsSiteFavicon,
}

impl IconType {
    /// Whether a `color` declaration means anything for this type
    #[must_use]
    pub fn supports_color(self) -> bool {
        matches!(self, IconType::SafariMaskIcon | IconType::MsTileImage)
    }
}

impl fmt::Display for IconType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IconType::Icon => "Icon",
            IconType::ShortcutIcon => "ShortcutIcon",
            IconType::AndroidChrome => "AndroidChrome",
            IconType::AndroidChromeMaskable => "AndroidChromeMaskable",
            IconType::AppleTouch => "AppleTouch",
            IconType::AppleTouchPrecomposed => "AppleTouchPrecomposed",
            IconType::SafariMaskIcon => "SafariMaskIcon",
            IconType::MsTileImage => "MsTileImage",
            IconType::OpenGraphImage => "OpenGraphImage",
            IconType::JsSiteFavicon => "JsSiteFavicon",
        };
        write!(f, "{name}")
    }
}

/// One discovered icon
///
/// **INVARIANT:** `url` is absolute and carries no query string once the
/// candidate leaves the factory. Two candidates denote the same icon iff their
/// URLs are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconCandidate {
    pub url: String,
    pub icon_type: IconType,
    pub size: Option<Size>,
    pub image_mime_type: Option<String>,
    pub is_mime_type_derived_from_filename: bool,
    /// Only set for `SafariMaskIcon` and `MsTileImage`
    pub color: Option<String>,

    /// Set by the ranker once it tried to download the icon to measure it
    #[serde(skip)]
    pub tried_to_retrieve_size: bool,
    /// Bytes downloaded while measuring, kept so nobody downloads them again
    #[serde(skip)]
    pub image_bytes: Option<Vec<u8>>,
}

impl IconCandidate {
    /// Candidate with nothing but a URL and a type
    #[must_use]
    pub fn new(url: impl Into<String>, icon_type: IconType) -> Self {
        Self {
            url: url.into(),
            icon_type,
            size: None,
            image_mime_type: None,
            is_mime_type_derived_from_filename: false,
            color: None,
            tried_to_retrieve_size: false,
            image_bytes: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }
}

impl fmt::Display for IconCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            Some(size) => write!(f, "{} {} {}", self.icon_type, size, self.url),
            None => write!(f, "{} {}", self.icon_type, self.url),
        }
    }
}

/// Check whether `candidates` already holds an icon with `url`
#[must_use]
pub fn contains_icon_with_url(candidates: &[IconCandidate], url: &str) -> bool {
    candidates.iter().any(|candidate| candidate.url == url)
}

/// Append `additional` to `candidates`, skipping URLs that are already present
///
/// First occurrence wins, so the order of the merge decides which type and
/// size a duplicated URL keeps.
pub fn merge_unique(candidates: &mut Vec<IconCandidate>, additional: Vec<IconCandidate>) {
    for candidate in additional {
        if !contains_icon_with_url(candidates, &candidate.url) {
            candidates.push(candidate);
        }
    }
}
