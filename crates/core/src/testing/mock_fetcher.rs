//! Mock fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::provider::{Fetcher, ProviderError};

/// Mock implementation of the Fetcher trait.
///
/// Provides controllable behavior for testing:
/// - Return a default body, or a specific body per URL
/// - Track requested URLs for assertions
/// - Simulate transport failures
///
/// # Example
///
/// ```rust,ignore
/// use anitorrent_core::testing::MockFetcher;
///
/// let fetcher = MockFetcher::with_body("[]");
/// fetcher.set_error(ProviderError::Timeout).await;
///
/// let provider = IndexerProvider::new(Dialect::AnimeTosho, "http://feed", Arc::new(fetcher));
/// ```
#[derive(Clone, Default)]
pub struct MockFetcher {
    /// Body returned for URLs without a specific response.
    default_body: Arc<RwLock<Option<String>>>,
    /// Bodies keyed by exact URL.
    bodies: Arc<RwLock<HashMap<String, String>>>,
    /// If set, the next fetch fails with this error.
    next_error: Arc<RwLock<Option<ProviderError>>>,
    /// URLs requested, in order.
    requests: Arc<RwLock<Vec<String>>>,
}

impl std::fmt::Debug for MockFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockFetcher")
            .field("default_body", &"<body>")
            .field("bodies", &"<bodies>")
            .field("next_error", &"<next_error>")
            .field("requests", &"<requests>")
            .finish()
    }
}

impl MockFetcher {
    /// Create a mock fetcher with no configured responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock fetcher returning `body` for every URL.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            default_body: Arc::new(RwLock::new(Some(body.into()))),
            ..Self::default()
        }
    }

    /// Set the body returned for URLs without a specific response.
    pub async fn set_default_body(&self, body: impl Into<String>) {
        *self.default_body.write().await = Some(body.into());
    }

    /// Set the body returned for one exact URL.
    pub async fn set_body_for(&self, url: &str, body: impl Into<String>) {
        self.bodies
            .write()
            .await
            .insert(url.to_string(), body.into());
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_error(&self, error: ProviderError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get the URLs requested so far.
    pub async fn requested_urls(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    /// Get the number of fetches performed.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, ProviderError> {
        self.requests.write().await.push(url.to_string());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        if let Some(body) = self.bodies.read().await.get(url) {
            return Ok(body.clone());
        }

        self.default_body
            .read()
            .await
            .clone()
            .ok_or_else(|| ProviderError::Http {
                status: 404,
                body: format!("No mock response for {}", url),
            })
    }
}
