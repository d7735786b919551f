//! Icon candidates, their sizes, and the factory that normalizes them

pub mod factory;
pub mod size;
pub mod types;

pub use factory::{create_favicon, create_favicon_from_sizes_string, mime_type_from_url};
pub use size::{max_size, parse_size_token, parse_sizes, size_from_url, Size};
pub use types::{contains_icon_with_url, merge_unique, IconCandidate, IconType};
