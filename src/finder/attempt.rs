//! URL variant state machine of the page fetch
//!
//! A page is fetched as at most four variants: with or without `www.`, each
//! with a mobile and a desktop user agent. The transitions are pure so the
//! decision tree can be tested without a network.

use crate::icon::{IconCandidate, IconType};

/// Which variant of the input URL the next attempt fetches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttemptState {
    pub append_www_dot: bool,
    pub request_desktop_site: bool,
}

impl AttemptState {
    /// Whether the icons found on this attempt's page are final
    ///
    /// A page yielding nothing but a lone shortcut icon might be an error
    /// page in disguise, so that result is only accepted on the last variant.
    #[must_use]
    pub fn accepts(self, favicons: &[IconCandidate], is_relative_url: bool) -> bool {
        if favicons.is_empty() {
            return false;
        }

        let is_last_variant =
            (!is_relative_url || self.append_www_dot) && self.request_desktop_site;

        is_last_variant || !is_single_shortcut_icon(favicons)
    }

    /// Next variant after a page was fetched but its icons were not accepted
    #[must_use]
    pub fn after_page(self, is_relative_url: bool) -> Option<Self> {
        if !self.request_desktop_site {
            Some(Self {
                request_desktop_site: true,
                ..self
            })
        } else if !self.append_www_dot && is_relative_url {
            Some(Self {
                append_www_dot: true,
                request_desktop_site: false,
            })
        } else {
            None
        }
    }

    /// Next variant after the page could not be fetched
    ///
    /// Only user input without scheme and without `www.` is worth another try.
    #[must_use]
    pub fn after_failure(self, is_relative_url: bool, url: &str) -> Option<Self> {
        let already_has_www = url.to_ascii_lowercase().contains("www.");

        if !self.append_www_dot && is_relative_url && !already_has_www {
            Some(Self {
                append_www_dot: true,
                request_desktop_site: false,
            })
        } else {
            None
        }
    }
}

/// Exactly one candidate, and it's a shortcut icon
#[must_use]
pub fn is_single_shortcut_icon(favicons: &[IconCandidate]) -> bool {
    matches!(favicons, [only] if only.icon_type == IconType::ShortcutIcon)
}
