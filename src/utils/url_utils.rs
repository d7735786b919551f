//! URL manipulation utilities.
//!
//! Pure string helpers for turning user input and markup links into absolute
//! URLs. No I/O happens here.

use url::{Host, Url};

/// Check whether `url` lacks an http(s) scheme
#[must_use]
pub fn is_relative_url(url: &str) -> bool {
    !starts_with_ignore_case(url, "http")
}

/// Turn user input like `example.com` into a fetchable URL
///
/// URLs that already carry a scheme are returned unchanged. Otherwise
/// `https://` is prepended, optionally after inserting `www.`.
#[must_use]
pub fn make_url_absolute(url: &str, append_www_dot: bool) -> String {
    if starts_with_ignore_case(url, "http") || url.contains("://") {
        return url.to_string();
    }

    if append_www_dot && !starts_with_ignore_case(url, "www.") {
        format!("https://www.{url}")
    } else {
        format!("https://{url}")
    }
}

/// Resolve a link found in a document against the document's URL
///
/// Handles root-relative (`/a.png`), dot-relative (`./a.png`, `../a.png`),
/// bare file names (`a.png`) and protocol-relative (`//cdn.com/a.png`) links.
/// Links that cannot be resolved are returned unchanged.
#[must_use]
pub fn make_link_absolute(link: &str, base_url: &str) -> String {
    if let Some(without_slashes) = link.strip_prefix("//") {
        let scheme = if starts_with_ignore_case(base_url, "https:") {
            "https"
        } else {
            "http"
        };
        return format!("{scheme}://{without_slashes}");
    }

    if starts_with_ignore_case(link, "http") {
        return link.to_string();
    }

    match Url::parse(base_url).and_then(|base| base.join(link)) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            log::debug!("Could not resolve '{link}' against '{base_url}': {e}");
            link.to_string()
        }
    }
}

/// Prefix `https://` unless the URL already starts with a http(s) scheme
#[must_use]
pub fn ensure_starts_with_http_or_https(url: &str) -> String {
    if starts_with_ignore_case(url, "http://") || starts_with_ignore_case(url, "https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Strip the scheme and a leading `www.`, e.g. `https://www.a.com/x` -> `a.com/x`
#[must_use]
pub fn remove_protocol_and_www(url: &str) -> String {
    let without_protocol = match url.find("://") {
        Some(index) => &url[index + "://".len()..],
        None => url,
    };

    if starts_with_ignore_case(without_protocol, "www.") {
        without_protocol[4..].to_string()
    } else {
        without_protocol.to_string()
    }
}

/// `scheme://host[:port]` of an absolute URL
///
/// Default ports are omitted because `Url::port()` already normalizes them away.
#[must_use]
pub fn host_root(url: &Url) -> Option<String> {
    let host = url.host_str()?;

    Some(match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    })
}

/// Registrable parent of a subdomain host: `staging.example.com` -> `example.com`
///
/// Located via the second-to-last dot, so hosts with fewer than three labels
/// and IP literals have no parent.
#[must_use]
pub fn parent_domain(url: &Url) -> Option<String> {
    let Some(Host::Domain(host)) = url.host() else {
        return None;
    };

    let last_dot = host.rfind('.')?;
    let second_last_dot = host[..last_dot].rfind('.')?;

    Some(host[second_last_dot + 1..].to_string())
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|start| start.eq_ignore_ascii_case(prefix))
}
