//! The HTTP capability the discovery pipeline depends on

use std::future::Future;

use super::response::{RequestOptions, WebResponse};

/// Minimal HTTP client used by every network-facing component
///
/// Implementations follow redirects and honor the user agent of the request
/// options. They never fail: transport errors come back as an unsuccessful
/// [`WebResponse`].
pub trait WebClient: Send + Sync {
    /// Fetch `url` including its body
    fn get(&self, url: &str, options: &RequestOptions) -> impl Future<Output = WebResponse> + Send;

    /// Existence check without a body
    fn head(&self, url: &str, options: &RequestOptions)
    -> impl Future<Output = WebResponse> + Send;
}

impl<C: WebClient> WebClient for &C {
    fn get(&self, url: &str, options: &RequestOptions) -> impl Future<Output = WebResponse> + Send {
        (**self).get(url, options)
    }

    fn head(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = WebResponse> + Send {
        (**self).head(url, options)
    }
}
