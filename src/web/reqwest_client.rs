//! `WebClient` backed by `reqwest`

use futures::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{redirect, Client, Method, Response, StatusCode};

use super::client::WebClient;
use super::response::{normalize_content_type, RequestOptions, WebResponse};
use crate::config::FinderConfig;
use crate::errors::{FaviconError, FaviconResult};

/// HTTP client for live sites
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestWebClient {
    client: Client,
    default_user_agent: String,
}

impl ReqwestWebClient {
    /// Build a client with the timeouts, redirect limit and TLS settings of `config`
    ///
    /// # Errors
    ///
    /// Returns `FaviconError::Http` if the TLS backend cannot be initialized.
    pub fn new(config: &FinderConfig) -> FaviconResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.request_timeout())
            .redirect(redirect::Policy::limited(config.max_redirects()))
            .danger_accept_invalid_certs(config.accept_invalid_certs())
            .build()?;

        Ok(Self {
            client,
            default_user_agent: config.desktop_user_agent().to_string(),
        })
    }

    async fn send(&self, method: Method, url: &str, options: &RequestOptions) -> FaviconResult<Response> {
        let user_agent = options
            .user_agent
            .as_deref()
            .unwrap_or(&self.default_user_agent);

        let response = self
            .client
            .request(method, url)
            .header(USER_AGENT, user_agent)
            .header(ACCEPT, options.accept.as_str())
            .send()
            .await?;

        Ok(response)
    }

    async fn fetch(&self, url: &str, options: &RequestOptions) -> FaviconResult<WebResponse> {
        let response = self.send(Method::GET, url, options).await?;
        let mut web_response = response_head(&response);

        if !web_response.successful {
            return Ok(web_response);
        }

        // Refuse early when the server announces an oversized body
        if let (Some(limit), Some(expected)) = (options.max_body_bytes, response.content_length())
            && expected > limit as u64
        {
            log::debug!("Skipping body of {url}: {expected} bytes exceeds limit of {limit}");
            web_response.successful = false;
            return Ok(web_response);
        }

        let mut buffer = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;

            if let Some(limit) = options.max_body_bytes
                && buffer.len() + chunk.len() > limit
            {
                log::debug!("Abandoned body of {url}: exceeded limit of {limit} bytes");
                web_response.successful = false;
                return Ok(web_response);
            }

            buffer.extend_from_slice(&chunk);
        }

        web_response.body = Some(buffer);
        Ok(web_response)
    }

    async fn check(&self, url: &str, options: &RequestOptions) -> FaviconResult<WebResponse> {
        let response = self.send(Method::HEAD, url, options).await?;

        // Some servers don't implement HEAD at all
        if response.status() == StatusCode::METHOD_NOT_ALLOWED {
            log::debug!("HEAD not allowed for {url}, falling back to GET");
            let response = self.send(Method::GET, url, options).await?;
            return Ok(response_head(&response));
        }

        Ok(response_head(&response))
    }
}

impl WebClient for ReqwestWebClient {
    async fn get(&self, url: &str, options: &RequestOptions) -> WebResponse {
        self.fetch(url, options)
            .await
            .unwrap_or_else(|e| transport_failure(url, &e))
    }

    async fn head(&self, url: &str, options: &RequestOptions) -> WebResponse {
        self.check(url, options)
            .await
            .unwrap_or_else(|e| transport_failure(url, &e))
    }
}

fn response_head(response: &Response) -> WebResponse {
    let status = response.status();

    WebResponse {
        successful: status.is_success(),
        status: Some(status.as_u16()),
        content_type: response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(normalize_content_type),
        body: None,
        url: response.url().to_string(),
    }
}

fn transport_failure(url: &str, error: &FaviconError) -> WebResponse {
    log::debug!("Request to {url} failed: {error}");
    WebResponse::failed(url)
}
