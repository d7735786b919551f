//! Icon sources of a single page: markup, web manifest and standard locations

pub mod manifest;
pub mod markup;
pub mod standard_location;

pub use manifest::{decode_manifest, icons_from_manifest, ManifestIconExtractor, WebManifest, WebManifestIcon};
pub use markup::{manifest_url, map_tags_to_candidates, parse_head_tags, HeadTag, MarkupIconExtractor};
pub use standard_location::StandardLocationProbe;
