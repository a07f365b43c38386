//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock upstream transport injected, so the host contract can be
//! exercised without reaching a real indexer.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use anitorrent_core::{
    provider::Fetcher, testing::MockFetcher, Config, Dialect, IndexerProvider, ProviderConfig,
    ServerConfig,
};

/// Re-export fixtures for test convenience
pub use anitorrent_core::testing::fixtures;

/// Base URL the mock upstream pretends to live at.
pub const UPSTREAM_BASE: &str = "http://upstream.test";

/// Test fixture for E2E testing with a mock upstream.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_latest() {
///     let fixture = TestFixture::new(Dialect::AnimeTosho);
///     fixture.fetcher.set_default_body(fixtures::ANIMETOSHO_FEED).await;
///
///     let response = fixture.get("/api/v1/provider/latest").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock upstream transport - configure bodies and failures
    pub fetcher: Arc<MockFetcher>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture speaking `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        let fetcher = Arc::new(MockFetcher::new());

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            provider: ProviderConfig {
                dialect,
                base_url: Some(UPSTREAM_BASE.to_string()),
                ..Default::default()
            },
        };

        let provider = IndexerProvider::new(
            dialect,
            UPSTREAM_BASE,
            Arc::clone(&fetcher) as Arc<dyn Fetcher>,
        );

        let state = Arc::new(anitorrent_server::state::AppState::new(
            config,
            Arc::new(provider),
        ));
        let router = anitorrent_server::api::create_router(state);

        Self { router, fetcher }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}
