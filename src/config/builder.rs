//! Fluent builder for `FinderConfig`
//!
//! All fields have defaults, so a builder can be turned into a config at any
//! point. `build()` validates the values that would make the HTTP client
//! unusable.

use crate::errors::{FaviconError, FaviconResult};
use crate::utils::{
    CHROME_MOBILE_USER_AGENT, CHROME_USER_AGENT, DEFAULT_MAX_ICON_BYTES, DEFAULT_MAX_REDIRECTS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

use super::types::FinderConfig;

#[derive(Debug, Clone)]
pub struct FinderConfigBuilder {
    pub(crate) request_timeout_secs: u64,
    pub(crate) max_redirects: usize,
    pub(crate) desktop_user_agent: String,
    pub(crate) mobile_user_agent: String,
    pub(crate) accept_invalid_certs: bool,
    pub(crate) probe_default_favicon: bool,
    pub(crate) probe_touch_icons: bool,
    pub(crate) verify_icons_exist: bool,
    pub(crate) max_icon_bytes: usize,
}

impl Default for FinderConfigBuilder {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            desktop_user_agent: CHROME_USER_AGENT.to_string(),
            mobile_user_agent: CHROME_MOBILE_USER_AGENT.to_string(),
            accept_invalid_certs: false,
            probe_default_favicon: true,
            probe_touch_icons: false,
            verify_icons_exist: true,
            max_icon_bytes: DEFAULT_MAX_ICON_BYTES,
        }
    }
}

impl FinderConfig {
    /// Create a builder for configuring a `FinderConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> FinderConfigBuilder {
        FinderConfigBuilder::default()
    }
}

impl FinderConfigBuilder {
    /// Set the per-request timeout in seconds (default: 30)
    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Set how many redirects a single request may follow (default: 10)
    #[must_use]
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// User agent sent on the "request desktop site" attempts
    #[must_use]
    pub fn desktop_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.desktop_user_agent = user_agent.into();
        self
    }

    /// User agent sent on the first attempt for each URL variant
    #[must_use]
    pub fn mobile_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.mobile_user_agent = user_agent.into();
        self
    }

    /// Accept invalid TLS certificates
    ///
    /// Only the client built from this config is affected. Meant for testing
    /// against self-signed hosts; leave it off otherwise.
    #[must_use]
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    #[must_use]
    pub fn probe_default_favicon(mut self, probe: bool) -> Self {
        self.probe_default_favicon = probe;
        self
    }

    /// Also look for `android-chrome-192x192.png`, `android-chrome-512x512.png`
    /// and `apple-touch-icon.png` at the site root
    #[must_use]
    pub fn probe_touch_icons(mut self, probe: bool) -> Self {
        self.probe_touch_icons = probe;
        self
    }

    /// Check every found icon with a HEAD request and drop the dead ones
    #[must_use]
    pub fn verify_icons_exist(mut self, verify: bool) -> Self {
        self.verify_icons_exist = verify;
        self
    }

    #[must_use]
    pub fn max_icon_bytes(mut self, bytes: usize) -> Self {
        self.max_icon_bytes = bytes;
        self
    }

    /// Validate and build the configuration
    ///
    /// # Errors
    ///
    /// Returns `FaviconError::InvalidConfig` if the timeout is zero or a user
    /// agent is blank.
    pub fn build(self) -> FaviconResult<FinderConfig> {
        if self.request_timeout_secs == 0 {
            return Err(FaviconError::InvalidConfig(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.desktop_user_agent.trim().is_empty() || self.mobile_user_agent.trim().is_empty() {
            return Err(FaviconError::InvalidConfig(
                "user agents must not be blank".to_string(),
            ));
        }

        Ok(self.into_config())
    }

    pub(crate) fn into_config(self) -> FinderConfig {
        FinderConfig {
            request_timeout_secs: self.request_timeout_secs,
            max_redirects: self.max_redirects,
            desktop_user_agent: self.desktop_user_agent,
            mobile_user_agent: self.mobile_user_agent,
            accept_invalid_certs: self.accept_invalid_certs,
            probe_default_favicon: self.probe_default_favicon,
            probe_touch_icons: self.probe_touch_icons,
            verify_icons_exist: self.verify_icons_exist,
            max_icon_bytes: self.max_icon_bytes,
        }
    }
}
