//! Normalized icon candidates from raw tag and manifest attributes
//!
//! Every candidate the pipeline produces goes through here, which keeps the
//! invariants of [`IconCandidate`] in one place: the URL is query-free and
//! absolute, the MIME type is inferred from the file name when none was
//! declared, and a size pattern in the file name fills in a missing size.

use super::size::{max_size, size_from_url, Size};
use super::types::{IconCandidate, IconType};
use crate::utils::make_link_absolute;

/// Build a candidate, or `None` when the source carried no URL
///
/// The size pattern lookup runs on the URL as given, before the query string is
/// removed.
#[must_use]
pub fn create_favicon(
    url: Option<&str>,
    page_url: &str,
    icon_type: IconType,
    mime_type: Option<&str>,
    size: Option<Size>,
    color: Option<&str>,
) -> Option<IconCandidate> {
    let url = url?;
    let url_without_query = remove_query(url);

    let (image_mime_type, is_mime_type_derived_from_filename) = match mime_type {
        Some(mime_type) => (Some(mime_type.to_string()), false),
        None => (mime_type_from_url(url_without_query).map(str::to_string), true),
    };

    Some(IconCandidate {
        url: make_link_absolute(url_without_query, page_url),
        icon_type,
        size: size.or_else(|| size_from_url(url)),
        image_mime_type,
        is_mime_type_derived_from_filename,
        color: color.map(str::to_string),
        tried_to_retrieve_size: false,
        image_bytes: None,
    })
}

/// Like [`create_favicon`], taking the size from a `sizes` attribute
///
/// The largest valid token wins. A blank or missing sizes string leaves the
/// size to the URL inference.
#[must_use]
pub fn create_favicon_from_sizes_string(
    url: Option<&str>,
    page_url: &str,
    icon_type: IconType,
    mime_type: Option<&str>,
    sizes: Option<&str>,
    color: Option<&str>,
) -> Option<IconCandidate> {
    let size = sizes
        .filter(|sizes| !sizes.trim().is_empty())
        .and_then(max_size);

    create_favicon(url, page_url, icon_type, mime_type, size, color)
}

/// MIME type for the file extension of `url`
///
/// `image/x-icon` is used for `.ico` since it is far more common in the wild
/// than the registered `image/vnd.microsoft.icon`.
#[must_use]
pub fn mime_type_from_url(url: &str) -> Option<&'static str> {
    let extension = url.rsplit('.').next()?.to_ascii_lowercase();

    match extension.as_str() {
        "png" => Some("image/png"),
        "svg" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),
        "gif" => Some("image/gif"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "tif" | "tiff" => Some("image/tiff"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Cut the URL at the first `?`, unless the `?` is its very first character
fn remove_query(url: &str) -> &str {
    match url.find('?') {
        Some(index) if index > 0 => &url[..index],
        _ => url,
    }
}
