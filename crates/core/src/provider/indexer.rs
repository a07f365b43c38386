//! Provider implementation shared by every dialect.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::metrics::{RECORDS_PARSED, UPSTREAM_DURATION, UPSTREAM_REQUESTS};

use super::dialect::Dialect;
use super::fetcher::{Fetcher, HttpFetcher};
use super::parser::{parser_for, ResponseParser};
use super::query::QueryBuilder;
use super::strategy::{plan_smart_search, SearchPlan};
use super::types::{AnimeProvider, AnimeTorrent, ProviderError, ProviderSettings, SearchIntent};

/// An indexer speaking one dialect.
///
/// Each call issues at most one upstream request and holds no mutable
/// state, so a provider can serve concurrent searches.
pub struct IndexerProvider {
    queries: QueryBuilder,
    parser: Box<dyn ResponseParser>,
    fetcher: Arc<dyn Fetcher>,
}

impl IndexerProvider {
    /// Create a provider for `dialect` at `base_url`, fetching through `fetcher`.
    pub fn new(dialect: Dialect, base_url: &str, fetcher: Arc<dyn Fetcher>) -> Self {
        let queries = QueryBuilder::new(dialect, base_url);
        let parser = parser_for(dialect, queries.base_url());
        Self {
            queries,
            parser,
            fetcher,
        }
    }

    /// Create a provider from configuration with an HTTP fetcher.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let fetcher = HttpFetcher::new(
            Duration::from_secs(config.timeout_secs as u64),
            &config.user_agent,
        )?;
        Ok(Self::new(
            config.dialect,
            config.effective_base_url(),
            Arc::new(fetcher),
        ))
    }

    pub fn dialect(&self) -> Dialect {
        self.queries.dialect()
    }

    pub fn queries(&self) -> &QueryBuilder {
        &self.queries
    }

    /// Fetch one URL and parse it with the dialect's parser.
    async fn fetch_torrents(&self, url: &str) -> Result<Vec<AnimeTorrent>, ProviderError> {
        let dialect = self.dialect().name();
        debug!(dialect = dialect, url = url, "Querying indexer");

        let start = Instant::now();
        let result = self.fetcher.fetch_text(url).await;
        UPSTREAM_DURATION
            .with_label_values(&[dialect])
            .observe(start.elapsed().as_secs_f64());

        let body = match result {
            Ok(body) => {
                UPSTREAM_REQUESTS
                    .with_label_values(&[dialect, "success"])
                    .inc();
                body
            }
            Err(e) => {
                warn!(dialect = dialect, error = %e, "Indexer request failed");
                UPSTREAM_REQUESTS
                    .with_label_values(&[dialect, "failure"])
                    .inc();
                return Err(e);
            }
        };

        let torrents = self.parser.parse(&body).inspect_err(|e| {
            warn!(dialect = dialect, error = %e, "Indexer returned an unreadable payload");
        })?;

        RECORDS_PARSED
            .with_label_values(&[dialect])
            .inc_by(torrents.len() as u64);
        debug!(dialect = dialect, results = torrents.len(), "Indexer query complete");

        Ok(torrents)
    }
}

#[async_trait]
impl AnimeProvider for IndexerProvider {
    fn name(&self) -> &str {
        self.dialect().name()
    }

    fn settings(&self) -> ProviderSettings {
        self.dialect().settings()
    }

    async fn search(&self, intent: &SearchIntent) -> Result<Vec<AnimeTorrent>, ProviderError> {
        let url = self.queries.search_url(intent.base_query());
        self.fetch_torrents(&url).await
    }

    async fn smart_search(
        &self,
        intent: &SearchIntent,
    ) -> Result<Vec<AnimeTorrent>, ProviderError> {
        match plan_smart_search(&self.queries, intent) {
            SearchPlan::Unsatisfiable(_) => Ok(Vec::new()),
            SearchPlan::Fetch { url, post_filter } => {
                let torrents = self.fetch_torrents(&url).await?;
                Ok(post_filter.apply(torrents))
            }
        }
    }

    async fn latest(&self) -> Result<Vec<AnimeTorrent>, ProviderError> {
        let url = self.queries.latest_url();
        self.fetch_torrents(&url).await
    }
}
