//! Transport seam: fetching upstream payloads.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::types::ProviderError;

/// Maximum characters of an error body kept in `ProviderError::Http`.
const ERROR_BODY_PREVIEW: usize = 200;

/// Fetches the body of an upstream URL.
///
/// Non-success statuses are errors. Implementations must not retry.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, ProviderError>;
}

/// reqwest-backed fetcher.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given request timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ProviderError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, ProviderError> {
        debug!(url = url, "Fetching upstream");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_PREVIEW).collect(),
            });
        }

        Ok(response.text().await?)
    }
}
