//! Icon dimensions and the parsers for declared sizes
//!
//! Sizes come from three places: the `sizes` attribute of a `<link>` tag
//! (`"16x16 32x32"`), the `sizes` member of a web manifest icon, and size
//! patterns embedded in file names (`icon-192x192.png`).

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    // Hardcoded and syntactically valid; a parse failure is a compile-time bug.
    static ref ICON_SIZE_REGEX: Regex = Regex::new(r"\d{2,4}[xX×]\d{2,4}")
        .expect("BUG: hardcoded icon size regex is invalid");
}

/// Width and height of an icon in pixels
///
/// Ordered by width first, then height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both edges have the same length
    #[must_use]
    pub const fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Longer of the two edges
    #[must_use]
    pub fn max_edge(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// Parse a single size token like `16x16`, `16X16` or `16×16`
///
/// The separators are tried in that order. `×` isn't allowed by the HTML
/// standard but the New York Times uses it.
#[must_use]
pub fn parse_size_token(token: &str) -> Option<Size> {
    ['x', '×', 'X']
        .iter()
        .find_map(|separator| split_in_two(token, *separator))
        .and_then(|(width, height)| {
            Some(Size::new(width.parse().ok()?, height.parse().ok()?))
        })
}

/// Parse every valid token of a space-separated sizes string
///
/// Invalid tokens like `any` are dropped silently.
#[must_use]
pub fn parse_sizes(sizes: &str) -> Vec<Size> {
    sizes.split(' ').filter_map(parse_size_token).collect()
}

/// Largest valid size of a space-separated sizes string
#[must_use]
pub fn max_size(sizes: &str) -> Option<Size> {
    parse_sizes(sizes).into_iter().max()
}

/// Infer a size from a size pattern somewhere in the URL
///
/// First match wins; unrelated digit runs shaped like `WxH` are taken at face value.
#[must_use]
pub fn size_from_url(url: &str) -> Option<Size> {
    ICON_SIZE_REGEX
        .find(url)
        .and_then(|found| parse_size_token(found.as_str()))
}

fn split_in_two(token: &str, separator: char) -> Option<(&str, &str)> {
    let mut parts = token.split(separator);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Some((first, second)),
        _ => None,
    }
}
