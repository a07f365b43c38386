pub mod config;
pub mod metrics;
pub mod provider;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ProviderConfig,
    SanitizedConfig, ServerConfig,
};
pub use provider::{
    AnimeProvider, AnimeTorrent, Dialect, IndexerProvider, Media, MediaFormat, ProviderError,
    ProviderSettings, SearchIntent,
};
