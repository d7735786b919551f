//! URL templates of third-party favicon services

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{ensure_starts_with_http_or_https, remove_protocol_and_www};

/// Sizes Twenty Icons renders
const TWENTY_ICONS_SIZES: [u32; 6] = [16, 32, 64, 128, 180, 192];

/// Largest size Favicone accepts
const FAVICONE_MAX_SIZE: u32 = 256;

/// Services that only distinguish "normal" and "larger" switch above this size
const LARGER_THRESHOLD: u32 = 64;

/// A favicon-by-domain service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaviconService {
    /// `t0.gstatic.com/faviconV2`
    Google,
    /// `icons.duckduckgo.com/ip3/<host>.ico`
    DuckDuckGo,
    /// `www.faviconextractor.com/favicon/<host>`, needs a browser user agent
    FaviconExtractor,
    /// `twenty-icons.com/<host>/<size>`
    TwentyIcons,
    /// `favicone.com/<host>?s=<size>`
    Favicone,
    /// `favicon.is/<host>`
    FaviconIs,
    /// `favicon.yandex.net/favicon/<host>`
    Yandex,
    /// `icon.horse/icon/<host>`; sizes need a paid API key. Often answers 503.
    IconHorse { api_key: Option<String> },
}

impl FaviconService {
    /// Services queried by default, in priority order
    ///
    /// Icon Horse is left out since it fails too often.
    #[must_use]
    pub fn defaults() -> Vec<FaviconService> {
        vec![
            FaviconService::Google,
            FaviconService::DuckDuckGo,
            FaviconService::FaviconExtractor,
            FaviconService::TwentyIcons,
            FaviconService::Favicone,
            FaviconService::FaviconIs,
            FaviconService::Yandex,
        ]
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FaviconService::Google => "Google",
            FaviconService::DuckDuckGo => "DuckDuckGo",
            FaviconService::FaviconExtractor => "Favicon Extractor",
            FaviconService::TwentyIcons => "Twenty Icons",
            FaviconService::Favicone => "Favicone",
            FaviconService::FaviconIs => "Favicon.is",
            FaviconService::Yandex => "Yandex",
            FaviconService::IconHorse { .. } => "Icon Horse",
        }
    }

    /// Whether the service can be asked for a specific size
    #[must_use]
    pub fn supports_preferred_size(&self) -> bool {
        match self {
            FaviconService::Google | FaviconService::TwentyIcons | FaviconService::Favicone => true,
            FaviconService::IconHorse { api_key } => api_key.is_some(),
            FaviconService::DuckDuckGo
            | FaviconService::FaviconExtractor
            | FaviconService::FaviconIs
            | FaviconService::Yandex => false,
        }
    }

    /// Lookup URL for the site at `url`
    #[must_use]
    pub fn fetch_url(&self, url: &str, preferred_size: Option<u32>) -> String {
        let host = remove_protocol_and_www(url);

        match self {
            FaviconService::Google => google_url(url, preferred_size),
            FaviconService::DuckDuckGo => format!("https://icons.duckduckgo.com/ip3/{host}.ico"),
            FaviconService::FaviconExtractor => {
                format!("https://www.faviconextractor.com/favicon/{host}{}", larger_query(preferred_size))
            }
            FaviconService::TwentyIcons => match preferred_size {
                Some(size) => format!("https://twenty-icons.com/{host}/{}", closest_twenty_icons_size(size)),
                None => format!("https://twenty-icons.com/{host}"),
            },
            FaviconService::Favicone => match preferred_size {
                Some(size) => format!("https://favicone.com/{host}?s={}", size.min(FAVICONE_MAX_SIZE)),
                None => format!("https://favicone.com/{host}"),
            },
            FaviconService::FaviconIs => {
                format!("https://favicon.is/{host}{}", larger_query(preferred_size))
            }
            // With a scheme in the path Yandex renders the icon on a gray background
            FaviconService::Yandex => format!("https://favicon.yandex.net/favicon/{host}"),
            FaviconService::IconHorse { api_key } => match (api_key, preferred_size) {
                (Some(key), Some(size)) => format!(
                    "https://icon.horse/icon/{host}?apikey={key}&size={}",
                    icon_horse_size(size)
                ),
                (Some(key), None) => format!("https://icon.horse/icon/{host}?apikey={key}"),
                (None, _) => format!("https://icon.horse/icon/{host}"),
            },
        }
    }
}

impl fmt::Display for FaviconService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `max_size` is twice the requested size so Google may scale down instead of up
fn google_url(url: &str, preferred_size: Option<u32>) -> String {
    let mut fetch_url =
        "https://t0.gstatic.com/faviconV2?client=chrome&nfrp=2&check_seen=true&min_size=16".to_string();

    if let Some(size) = preferred_size {
        fetch_url.push_str(&format!("&size={size}&max_size={}", size.saturating_mul(2)));
    }

    format!(
        "{fetch_url}&fallback_opts=TYPE,SIZE,URL&url={}",
        ensure_starts_with_http_or_https(url)
    )
}

fn larger_query(preferred_size: Option<u32>) -> &'static str {
    match preferred_size {
        Some(size) if size > LARGER_THRESHOLD => "?larger=true",
        _ => "",
    }
}

fn closest_twenty_icons_size(preferred_size: u32) -> u32 {
    let mut closest = TWENTY_ICONS_SIZES[0];

    for size in TWENTY_ICONS_SIZES {
        if size.abs_diff(preferred_size) < closest.abs_diff(preferred_size) {
            closest = size;
        }
    }

    closest
}

fn icon_horse_size(preferred_size: u32) -> &'static str {
    match preferred_size {
        0..=64 => "small",
        65..=192 => "medium",
        _ => "large",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_url() {
        assert_eq!(
            FaviconService::Google.fetch_url("example.com", Some(64)),
            "https://t0.gstatic.com/faviconV2?client=chrome&nfrp=2&check_seen=true&min_size=16&size=64&max_size=128&fallback_opts=TYPE,SIZE,URL&url=https://example.com"
        );
        assert_eq!(
            FaviconService::Google.fetch_url("http://example.com", None),
            "https://t0.gstatic.com/faviconV2?client=chrome&nfrp=2&check_seen=true&min_size=16&fallback_opts=TYPE,SIZE,URL&url=http://example.com"
        );
    }

    #[test]
    fn test_google_max_size_saturates() {
        let fetch_url = FaviconService::Google.fetch_url("example.com", Some(u32::MAX));

        assert!(fetch_url.contains(&format!("&size={}&max_size={}", u32::MAX, u32::MAX)));
    }

    #[test]
    fn test_host_only_services() {
        let url = "https://www.example.com";

        assert_eq!(
            FaviconService::DuckDuckGo.fetch_url(url, Some(128)),
            "https://icons.duckduckgo.com/ip3/example.com.ico"
        );
        assert_eq!(
            FaviconService::Yandex.fetch_url(url, None),
            "https://favicon.yandex.net/favicon/example.com"
        );
    }

    #[test]
    fn test_larger_switch() {
        let url = "example.com";

        assert_eq!(
            FaviconService::FaviconExtractor.fetch_url(url, Some(64)),
            "https://www.faviconextractor.com/favicon/example.com"
        );
        assert_eq!(
            FaviconService::FaviconIs.fetch_url(url, Some(65)),
            "https://favicon.is/example.com?larger=true"
        );
    }

    #[test]
    fn test_sized_services() {
        let url = "example.com";

        assert_eq!(
            FaviconService::TwentyIcons.fetch_url(url, Some(100)),
            "https://twenty-icons.com/example.com/128"
        );
        assert_eq!(
            FaviconService::TwentyIcons.fetch_url(url, Some(186)),
            "https://twenty-icons.com/example.com/180"
        );
        assert_eq!(
            FaviconService::Favicone.fetch_url(url, Some(512)),
            "https://favicone.com/example.com?s=256"
        );
        assert_eq!(
            FaviconService::Favicone.fetch_url(url, None),
            "https://favicone.com/example.com"
        );
    }

    #[test]
    fn test_icon_horse() {
        let free = FaviconService::IconHorse { api_key: None };
        let paid = FaviconService::IconHorse {
            api_key: Some("key".to_string()),
        };

        assert!(!free.supports_preferred_size());
        assert!(paid.supports_preferred_size());
        assert_eq!(free.fetch_url("example.com", Some(32)), "https://icon.horse/icon/example.com");
        assert_eq!(
            paid.fetch_url("example.com", Some(128)),
            "https://icon.horse/icon/example.com?apikey=key&size=medium"
        );
        assert_eq!(
            paid.fetch_url("example.com", Some(256)),
            "https://icon.horse/icon/example.com?apikey=key&size=large"
        );
    }

    #[test]
    fn test_defaults_exclude_icon_horse() {
        assert!(
            !FaviconService::defaults()
                .iter()
                .any(|service| matches!(service, FaviconService::IconHorse { .. }))
        );
    }
}
