//! Measuring icons that declare no size
//!
//! Only the image header is read; pixels are never decoded.

use std::io::Cursor;

use image::ImageReader;

use crate::errors::{FaviconError, FaviconResult};
use crate::icon::Size;
use crate::utils::ACCEPT_IMAGE;
use crate::web::{RequestOptions, WebClient};

/// Outcome of measuring one icon URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbedIcon {
    pub size: Option<Size>,
    pub bytes: Option<Vec<u8>>,
}

/// Width and height from the header of an encoded image
///
/// # Errors
///
/// Returns `FaviconError::ImageDecode` if the format is not recognized or
/// the header is malformed.
pub fn dimensions_from_bytes(url: &str, bytes: &[u8]) -> FaviconResult<Size> {
    let to_decode_error = |message: String| FaviconError::ImageDecode {
        url: url.to_string(),
        message,
    };

    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| to_decode_error(e.to_string()))?
        .into_dimensions()
        .map_err(|e| to_decode_error(e.to_string()))?;

    Ok(Size::new(width, height))
}

/// SVGs are vector graphics without intrinsic pixel size
#[must_use]
pub fn is_measurable(url: &str) -> bool {
    !url.to_ascii_lowercase().ends_with(".svg")
}

/// Download `url` and read its dimensions
///
/// The downloaded bytes are kept even when the header can't be read, so
/// nobody needs to fetch them again.
pub async fn probe_icon<C: WebClient>(client: &C, url: &str, max_icon_bytes: usize) -> ProbedIcon {
    let options = RequestOptions::accepting(ACCEPT_IMAGE).with_max_body_bytes(max_icon_bytes);
    let response = client.get(url, &options).await;

    let Some(bytes) = response.body.filter(|_| response.successful) else {
        log::debug!("Could not download icon {url} to measure it: status {:?}", response.status);
        return ProbedIcon::default();
    };

    let size = match dimensions_from_bytes(url, &bytes) {
        Ok(size) => Some(size),
        Err(e) => {
            log::debug!("{e}");
            None
        }
    };

    ProbedIcon {
        size,
        bytes: Some(bytes),
    }
}
