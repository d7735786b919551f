//! HTTP access for the discovery pipeline
//!
//! Components only see the [`WebClient`] trait. [`ReqwestWebClient`] is the
//! implementation used against live sites; tests plug in their own.

pub mod client;
pub mod reqwest_client;
pub mod response;

pub use client::WebClient;
pub use reqwest_client::ReqwestWebClient;
pub use response::{normalize_content_type, RequestOptions, WebResponse};
