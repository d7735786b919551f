//! Core configuration type for favicon discovery
//!
//! `FinderConfig` carries the transport settings of the HTTP client and the
//! switches that decide how much probing the pipeline does per page.

use serde::{Deserialize, Serialize};

/// Configuration shared by the finder, the ranker and the HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Per-request timeout.
    ///
    /// **INVARIANT:** Always greater than zero (validated in builder).
    pub(crate) request_timeout_secs: u64,
    pub(crate) max_redirects: usize,
    pub(crate) desktop_user_agent: String,
    pub(crate) mobile_user_agent: String,

    /// Accept invalid TLS certificates on this client only
    ///
    /// Applies to the client built from this config and nothing else; there is
    /// no process-wide certificate override.
    pub(crate) accept_invalid_certs: bool,

    /// Probe `/favicon.ico` after markup extraction
    pub(crate) probe_default_favicon: bool,

    /// Also probe the well-known android-chrome and apple-touch icon paths
    pub(crate) probe_touch_icons: bool,

    /// Drop candidates whose URL fails an existence check
    pub(crate) verify_icons_exist: bool,

    /// Largest body the ranker downloads to measure an icon
    pub(crate) max_icon_bytes: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self::builder().into_config()
    }
}
