pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{
    ensure_starts_with_http_or_https, is_relative_url, make_link_absolute, make_url_absolute,
    remove_protocol_and_www,
};
