//! Third-party favicon services
//!
//! A fallback source of icon bytes when a site can't be fetched or declares
//! nothing usable. Independent of the page-based extraction.

pub mod extractor_api;
pub mod gateway;
pub mod services;

pub use extractor_api::FaviconExtractorApi;
pub use gateway::{FaviconServiceGateway, ServiceIcon};
pub use services::FaviconService;
