//! Test utilities shared by the integration tests

use kodegen_tools_favicon::{RequestOptions, WebClient, WebResponse};
use mockito::{Mock, Server, ServerGuard};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

/// A request the fake client has seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub user_agent: Option<String>,
}

/// In-memory `WebClient` serving canned responses by exact URL
///
/// Unknown URLs answer 404. HEAD answers with the GET response minus body.
/// Bodies over `max_body_bytes` are abandoned like the real client does.
#[derive(Default)]
pub struct FakeWebClient {
    responses: HashMap<String, WebResponse>,
    responses_by_user_agent: HashMap<(String, String), WebResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[allow(dead_code)]
impl FakeWebClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` at `url`
    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.responses
            .insert(url.to_string(), WebResponse::ok(url, Some("text/html"), html));
        self
    }

    /// Serve `html` at `url`, but only to `user_agent`
    pub fn page_for_user_agent(mut self, url: &str, user_agent: &str, html: &str) -> Self {
        self.responses_by_user_agent.insert(
            (url.to_string(), user_agent.to_string()),
            WebResponse::ok(url, Some("text/html"), html),
        );
        self
    }

    pub fn image(mut self, url: &str, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        self.responses
            .insert(url.to_string(), WebResponse::ok(url, content_type, bytes));
        self
    }

    pub fn json(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), WebResponse::ok(url, Some("application/json"), body));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), WebResponse::with_status(url, status));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    pub fn requests_to(&self, url: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.url == url)
            .collect()
    }

    pub fn get_urls(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == "GET")
            .map(|request| request.url)
            .collect()
    }

    fn respond(&self, method: &'static str, url: &str, options: &RequestOptions) -> WebResponse {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(RecordedRequest {
                method,
                url: url.to_string(),
                user_agent: options.user_agent.clone(),
            });

        let by_user_agent = options.user_agent.as_ref().and_then(|user_agent| {
            self.responses_by_user_agent
                .get(&(url.to_string(), user_agent.clone()))
        });

        by_user_agent
            .or_else(|| self.responses.get(url))
            .cloned()
            .unwrap_or_else(|| WebResponse::with_status(url, 404))
    }
}

impl WebClient for FakeWebClient {
    async fn get(&self, url: &str, options: &RequestOptions) -> WebResponse {
        let mut response = self.respond("GET", url, options);

        if let (Some(limit), Some(body)) = (options.max_body_bytes, &response.body)
            && body.len() > limit
        {
            response.successful = false;
            response.body = None;
        }

        response
    }

    async fn head(&self, url: &str, options: &RequestOptions) -> WebResponse {
        let mut response = self.respond("HEAD", url, options);
        response.body = None;
        response
    }
}

/// Minimal HTML document with `head` as the head's content
#[allow(dead_code)]
pub fn html_page(head: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Test</title>
    {head}
</head>
<body><p>content</p></body>
</html>"#
    )
}

/// Encoded PNG of the given dimensions
#[allow(dead_code)]
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image::RgbaImage::new(width, height)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .expect("encoding a blank png should work");
    bytes.into_inner()
}

/// Sets up a mock HTTP server for tests that go through `ReqwestWebClient`
#[allow(dead_code)]
pub async fn setup_mock_server() -> ServerGuard {
    Server::new_async().await
}

/// Creates a mock endpoint that returns HTML content
#[allow(dead_code)]
pub async fn create_html_mock(server: &mut Server, path: &str, html: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an image
#[allow(dead_code)]
pub async fn create_image_mock(
    server: &mut Server,
    path: &str,
    content_type: &str,
    bytes: &[u8],
) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", content_type)
        .with_body(bytes)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns a redirect
#[allow(dead_code)]
pub async fn create_redirect_mock(server: &mut Server, from: &str, to: &str) -> Mock {
    server
        .mock("GET", from)
        .with_status(301)
        .with_header("location", to)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an error
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}
