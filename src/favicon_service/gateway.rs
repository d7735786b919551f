//! Icon bytes from the first favicon service that has one

use crate::config::FinderConfig;
use crate::utils::ACCEPT_IMAGE;
use crate::web::{RequestOptions, WebClient};

use super::services::FaviconService;

/// Icon returned by a favicon service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIcon {
    pub service: FaviconService,
    /// Lookup URL the bytes came from
    pub url: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Queries favicon services in priority order
pub struct FaviconServiceGateway<C> {
    client: C,
    services: Vec<FaviconService>,
    user_agent: String,
    max_icon_bytes: usize,
}

impl<C: WebClient> FaviconServiceGateway<C> {
    /// Gateway over [`FaviconService::defaults`]
    #[must_use]
    pub fn new(client: C, config: &FinderConfig) -> Self {
        Self::with_services(client, config, FaviconService::defaults())
    }

    #[must_use]
    pub fn with_services(client: C, config: &FinderConfig, services: Vec<FaviconService>) -> Self {
        Self {
            client,
            services,
            user_agent: config.desktop_user_agent().to_string(),
            max_icon_bytes: config.max_icon_bytes(),
        }
    }

    #[must_use]
    pub fn services(&self) -> &[FaviconService] {
        &self.services
    }

    /// Icon of the first service that answers successfully with a non-empty body
    ///
    /// With a `preferred_size` only services that can honor it are asked.
    /// Services are queried one after another; failures are logged and skipped.
    pub async fn first_matching(&self, url: &str, preferred_size: Option<u32>) -> Option<ServiceIcon> {
        let options = RequestOptions::accepting(ACCEPT_IMAGE)
            .with_user_agent(self.user_agent.as_str())
            .with_max_body_bytes(self.max_icon_bytes);

        let services = self
            .services
            .iter()
            .filter(|service| preferred_size.is_none() || service.supports_preferred_size());

        for service in services {
            let fetch_url = service.fetch_url(url, preferred_size);
            let response = self.client.get(&fetch_url, &options).await;

            match response.body {
                Some(bytes) if response.successful && !bytes.is_empty() => {
                    log::debug!("{service} returned an icon for {url}");
                    return Some(ServiceIcon {
                        service: service.clone(),
                        url: fetch_url,
                        bytes,
                        content_type: response.content_type,
                    });
                }
                _ => log::debug!(
                    "{service} has no icon for {url} (status {:?})",
                    response.status
                ),
            }
        }

        log::warn!("No favicon service returned an icon for {url}");
        None
    }
}
