//! Getter methods for `FinderConfig`

use std::time::Duration;

use super::types::FinderConfig;

impl FinderConfig {
    #[must_use]
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    #[must_use]
    pub fn desktop_user_agent(&self) -> &str {
        &self.desktop_user_agent
    }

    #[must_use]
    pub fn mobile_user_agent(&self) -> &str {
        &self.mobile_user_agent
    }

    /// User agent for a page attempt
    #[must_use]
    pub fn user_agent_for(&self, request_desktop_site: bool) -> &str {
        if request_desktop_site {
            &self.desktop_user_agent
        } else {
            &self.mobile_user_agent
        }
    }

    #[must_use]
    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    #[must_use]
    pub fn probe_default_favicon(&self) -> bool {
        self.probe_default_favicon
    }

    #[must_use]
    pub fn probe_touch_icons(&self) -> bool {
        self.probe_touch_icons
    }

    #[must_use]
    pub fn verify_icons_exist(&self) -> bool {
        self.verify_icons_exist
    }

    #[must_use]
    pub fn max_icon_bytes(&self) -> usize {
        self.max_icon_bytes
    }
}
