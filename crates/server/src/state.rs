use std::sync::Arc;

use anitorrent_core::{AnimeProvider, Config, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    provider: Arc<dyn AnimeProvider>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn AnimeProvider>) -> Self {
        Self { config, provider }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn provider(&self) -> &dyn AnimeProvider {
        self.provider.as_ref()
    }
}
