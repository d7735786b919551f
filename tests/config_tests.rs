//! Tests for the finder configuration builder

use kodegen_tools_favicon::utils::{CHROME_MOBILE_USER_AGENT, CHROME_USER_AGENT};
use kodegen_tools_favicon::{FaviconError, FinderConfig};
use std::time::Duration;

#[test]
fn test_builder_defaults() {
    let config = FinderConfig::builder().build().unwrap();

    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.max_redirects(), 10);
    assert_eq!(config.desktop_user_agent(), CHROME_USER_AGENT);
    assert_eq!(config.mobile_user_agent(), CHROME_MOBILE_USER_AGENT);
    assert!(!config.accept_invalid_certs());
    assert!(config.probe_default_favicon());
    assert!(!config.probe_touch_icons());
    assert!(config.verify_icons_exist());
    assert_eq!(config.max_icon_bytes(), 5 * 1024 * 1024);

    assert_eq!(config, FinderConfig::default());
}

#[test]
fn test_builder_with_all_optional_fields() {
    let config = FinderConfig::builder()
        .request_timeout_secs(5)
        .max_redirects(2)
        .desktop_user_agent("desktop")
        .mobile_user_agent("mobile")
        .accept_invalid_certs(true)
        .probe_default_favicon(false)
        .probe_touch_icons(true)
        .verify_icons_exist(false)
        .max_icon_bytes(1024)
        .build()
        .unwrap();

    assert_eq!(config.request_timeout_secs(), 5);
    assert_eq!(config.max_redirects(), 2);
    assert!(config.accept_invalid_certs());
    assert!(!config.probe_default_favicon());
    assert!(config.probe_touch_icons());
    assert!(!config.verify_icons_exist());
    assert_eq!(config.max_icon_bytes(), 1024);
}

#[test]
fn test_user_agent_per_attempt() {
    let config = FinderConfig::builder()
        .desktop_user_agent("desktop")
        .mobile_user_agent("mobile")
        .build()
        .unwrap();

    assert_eq!(config.user_agent_for(true), "desktop");
    assert_eq!(config.user_agent_for(false), "mobile");
}

#[test]
fn test_zero_timeout_is_rejected() {
    let result = FinderConfig::builder().request_timeout_secs(0).build();

    assert!(matches!(result, Err(FaviconError::InvalidConfig(_))));
}

#[test]
fn test_blank_user_agent_is_rejected() {
    let desktop = FinderConfig::builder().desktop_user_agent("  ").build();
    let mobile = FinderConfig::builder().mobile_user_agent("").build();

    assert!(matches!(desktop, Err(FaviconError::InvalidConfig(_))));
    assert!(matches!(mobile, Err(FaviconError::InvalidConfig(_))));
}
