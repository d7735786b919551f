//! Page fetch state machine and end-to-end extraction against an in-memory web

use kodegen_tools_favicon::{FaviconFinder, FinderConfig, IconRanker, IconType, Size};
use std::collections::HashSet;

mod common;
use common::{html_page, png_bytes, FakeWebClient};

const DESKTOP_UA: &str = "desktop-agent";
const MOBILE_UA: &str = "mobile-agent";

/// Config without network side quests, so only page requests happen
fn pages_only_config() -> FinderConfig {
    FinderConfig::builder()
        .desktop_user_agent(DESKTOP_UA)
        .mobile_user_agent(MOBILE_UA)
        .probe_default_favicon(false)
        .verify_icons_exist(false)
        .build()
        .expect("valid config")
}

fn lone_shortcut_icon_page() -> String {
    html_page(r#"<link rel="shortcut icon" href="/favicon.ico">"#)
}

#[tokio::test]
async fn test_lone_shortcut_icon_triggers_desktop_retry() {
    let desktop_page = html_page(
        r#"<link rel="shortcut icon" href="/favicon.ico">
           <link rel="apple-touch-icon" href="/apple-touch-icon.png" sizes="180x180">"#,
    );
    let client = FakeWebClient::new()
        .page_for_user_agent("https://example.com", MOBILE_UA, &lone_shortcut_icon_page())
        .page_for_user_agent("https://example.com", DESKTOP_UA, &desktop_page);
    let finder = FaviconFinder::new(client, pages_only_config());

    let favicons = finder.extract_favicons("https://example.com").await;

    assert_eq!(favicons.len(), 2);
    assert_eq!(favicons[1].icon_type, IconType::AppleTouch);

    let requests = finder.client().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].user_agent.as_deref(), Some(MOBILE_UA));
    assert_eq!(requests[1].user_agent.as_deref(), Some(DESKTOP_UA));
}

#[tokio::test]
async fn test_absolute_url_accepts_lone_shortcut_icon_on_desktop_attempt() {
    let client = FakeWebClient::new().page("https://example.com", &lone_shortcut_icon_page());
    let finder = FaviconFinder::new(client, pages_only_config());

    let favicons = finder.extract_favicons("https://example.com").await;

    assert_eq!(favicons.len(), 1);
    assert_eq!(favicons[0].icon_type, IconType::ShortcutIcon);
    assert_eq!(finder.client().get_urls().len(), 2);
}

#[tokio::test]
async fn test_relative_url_walks_all_four_variants() {
    let client = FakeWebClient::new()
        .page("https://example.com", &lone_shortcut_icon_page())
        .page("https://www.example.com", &lone_shortcut_icon_page());
    let finder = FaviconFinder::new(client, pages_only_config());

    let favicons = finder.extract_favicons("example.com").await;

    assert_eq!(favicons.len(), 1);
    assert_eq!(favicons[0].url, "https://www.example.com/favicon.ico");

    let user_agents: Vec<Option<String>> = finder
        .client()
        .requests()
        .into_iter()
        .map(|request| request.user_agent)
        .collect();
    assert_eq!(
        finder.client().get_urls(),
        vec![
            "https://example.com",
            "https://example.com",
            "https://www.example.com",
            "https://www.example.com",
        ]
    );
    assert_eq!(
        user_agents,
        vec![
            Some(MOBILE_UA.to_string()),
            Some(DESKTOP_UA.to_string()),
            Some(MOBILE_UA.to_string()),
            Some(DESKTOP_UA.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_unreachable_relative_url_retries_with_www() {
    let client = FakeWebClient::new().page(
        "https://www.example.com",
        &html_page(r#"<link rel="icon" href="/icon.png">"#),
    );
    let finder = FaviconFinder::new(client, pages_only_config());

    let favicons = finder.extract_favicons("example.com").await;

    assert_eq!(favicons.len(), 1);
    assert_eq!(favicons[0].url, "https://www.example.com/icon.png");
    assert_eq!(
        finder.client().get_urls(),
        vec!["https://example.com", "https://www.example.com"]
    );
}

#[tokio::test]
async fn test_unreachable_www_url_gives_up() {
    let finder = FaviconFinder::new(FakeWebClient::new(), pages_only_config());

    assert!(finder.extract_favicons("www.example.com").await.is_empty());
    assert!(finder.extract_favicons("https://example.com").await.is_empty());
    assert_eq!(finder.client().get_urls().len(), 2);
}

#[tokio::test]
async fn test_page_without_icons_is_empty() {
    let client = FakeWebClient::new().page("https://example.com", &html_page(""));
    let finder = FaviconFinder::new(client, pages_only_config());

    assert!(finder.extract_favicons("https://example.com").await.is_empty());
    assert_eq!(finder.client().get_urls().len(), 2);
}

#[tokio::test]
async fn test_query_stripped_shortcut_icon_end_to_end() {
    let client = FakeWebClient::new()
        .page(
            "https://www.test.com",
            &html_page(r#"<link rel="shortcut icon" href="/favicon_196px.png?v=1">"#),
        )
        .image(
            "https://www.test.com/favicon_196px.png",
            Some("image/png"),
            png_bytes(196, 196),
        );
    let finder = FaviconFinder::new(client, FinderConfig::default());

    let favicons = finder.extract_favicons("https://www.test.com").await;

    assert_eq!(favicons.len(), 1);
    assert_eq!(favicons[0].url, "https://www.test.com/favicon_196px.png");
    assert_eq!(favicons[0].icon_type, IconType::ShortcutIcon);
    assert_eq!(favicons[0].image_mime_type.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn test_dead_icons_are_dropped() {
    let client = FakeWebClient::new()
        .page(
            "https://example.com",
            &html_page(
                r#"<link rel="icon" href="/alive.png">
                   <link rel="apple-touch-icon" href="/dead.png">"#,
            ),
        )
        .image("https://example.com/alive.png", Some("image/png"), png_bytes(32, 32));
    let config = FinderConfig::builder()
        .probe_default_favicon(false)
        .build()
        .expect("valid config");
    let finder = FaviconFinder::new(client, config);

    let favicons = finder.extract_favicons("https://example.com").await;

    assert_eq!(favicons.len(), 1);
    assert_eq!(favicons[0].url, "https://example.com/alive.png");
}

#[tokio::test]
async fn test_default_favicon_is_merged() {
    let client = FakeWebClient::new()
        .page(
            "https://example.com",
            &html_page(r#"<link rel="icon" href="/icon.svg" type="image/svg+xml">"#),
        )
        .image("https://example.com/favicon.ico", Some("image/x-icon"), vec![0, 0, 1, 0]);
    let config = FinderConfig::builder()
        .verify_icons_exist(false)
        .build()
        .expect("valid config");
    let finder = FaviconFinder::new(client, config);

    let favicons = finder.extract_favicons("https://example.com").await;

    let urls: Vec<&str> = favicons.iter().map(|icon| icon.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://example.com/icon.svg", "https://example.com/favicon.ico"]
    );
    assert_eq!(favicons[1].icon_type, IconType::ShortcutIcon);
}

const CROWDED_HEAD: &str = r##"
    <link rel="icon" href="/favicon.ico" sizes="16x16 32x32">
    <link rel="shortcut icon" href="/favicon.ico">
    <link rel="apple-touch-icon" href="/apple-touch-icon.png" sizes="180x180">
    <link rel="apple-touch-icon-precomposed" href="/apple-touch-icon.png">
    <link rel="mask-icon" href="/safari-pinned-tab.svg" color="#5bbad5">
    <link rel="manifest" href="/site.webmanifest">
    <meta name="msapplication-TileColor" content="#da532c">
    <meta name="msapplication-TileImage" content="/mstile-144x144.png">
    <meta property="og:image" content="/og.png">
"##;

const CROWDED_MANIFEST: &str = r#"{
    "icons": [
        { "src": "/apple-touch-icon.png", "sizes": "180x180", "type": "image/png" },
        { "src": "/android-chrome-192x192.png", "sizes": "192x192", "type": "image/png" },
        { "src": "/android-chrome-512x512.png", "sizes": "512x512", "type": "image/png", "purpose": "maskable" }
    ]
}"#;

fn crowded_site() -> FakeWebClient {
    FakeWebClient::new()
        .json("https://example.com/site.webmanifest", CROWDED_MANIFEST)
        .image("https://example.com/favicon.ico", None, vec![0, 0, 1, 0])
}

#[tokio::test]
async fn test_no_two_candidates_share_a_url() {
    let finder = FaviconFinder::new(crowded_site(), FinderConfig::default());

    let favicons = finder
        .extract_favicons_from_html("https://example.com/", &html_page(CROWDED_HEAD))
        .await;

    let unique: HashSet<&str> = favicons.iter().map(|icon| icon.url.as_str()).collect();
    assert_eq!(unique.len(), favicons.len());
    assert_eq!(favicons.len(), 7);

    // First occurrence wins
    assert_eq!(favicons[0].icon_type, IconType::Icon);
    assert_eq!(favicons[1].icon_type, IconType::AppleTouch);

    let maskable = favicons
        .iter()
        .find(|icon| icon.url == "https://example.com/android-chrome-512x512.png")
        .expect("manifest icon should be merged");
    assert_eq!(maskable.icon_type, IconType::AndroidChromeMaskable);

    // favicon.ico was already declared, so it is not probed
    assert!(finder.client().requests_to("https://example.com/favicon.ico").is_empty());
}

#[tokio::test]
async fn test_extraction_is_idempotent() {
    let finder = FaviconFinder::new(crowded_site(), FinderConfig::default());
    let html = html_page(CROWDED_HEAD);

    let first = finder.extract_favicons_from_html("https://example.com/", &html).await;
    let second = finder.extract_favicons_from_html("https://example.com/", &html).await;

    let as_set = |favicons: &[kodegen_tools_favicon::IconCandidate]| {
        favicons
            .iter()
            .map(|icon| (icon.url.clone(), icon.icon_type, icon.size))
            .collect::<HashSet<_>>()
    };
    assert_eq!(as_set(first.as_slice()), as_set(second.as_slice()));
}

#[tokio::test]
async fn test_measured_icons_are_downloaded_once() {
    let client = FakeWebClient::new()
        .page(
            "https://example.com",
            &html_page(
                r#"<link rel="icon" href="/icon.png">
                   <link rel="apple-touch-icon" href="/gone.png">"#,
            ),
        )
        .image("https://example.com/icon.png", Some("image/png"), png_bytes(64, 64));
    let config = FinderConfig::builder()
        .probe_default_favicon(false)
        .build()
        .expect("valid config");
    let finder = FaviconFinder::new(&client, config.clone());
    let ranker = IconRanker::new(&client, &config);

    let favicons = finder
        .extract_measured_favicons("https://example.com", &ranker)
        .await;

    assert_eq!(favicons.len(), 1);
    assert_eq!(favicons[0].url, "https://example.com/icon.png");
    assert_eq!(favicons[0].size, Some(Size::new(64, 64)));

    let icon_requests = client.requests_to("https://example.com/icon.png");
    assert_eq!(icon_requests.len(), 1);
    assert_eq!(icon_requests[0].method, "GET");

    // The dead icon was measured, failed, and is then dropped by the existence check
    let gone_methods: Vec<&str> = client
        .requests_to("https://example.com/gone.png")
        .iter()
        .map(|request| request.method)
        .collect();
    assert_eq!(gone_methods, vec!["GET", "HEAD"]);
}
