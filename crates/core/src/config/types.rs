use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::provider::Dialect;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Upstream indexer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Which indexer dialect to speak (default: "anidex_html")
    #[serde(default)]
    pub dialect: Dialect,
    /// Override of the dialect's public base URL (e.g. a mirror)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// User-Agent header sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            base_url: None,
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ProviderConfig {
    /// The configured base URL, or the dialect's public one.
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.dialect.default_base_url())
    }
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("anitorrent/{}", env!("CARGO_PKG_VERSION"))
}

/// Config as exposed over the API
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub provider: SanitizedProviderConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedProviderConfig {
    pub dialect: Dialect,
    pub base_url: String,
    /// Whether the base URL was overridden
    pub custom_base_url: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            provider: SanitizedProviderConfig {
                dialect: config.provider.dialect,
                base_url: config.provider.effective_base_url().to_string(),
                custom_base_url: config.provider.base_url.is_some(),
                timeout_secs: config.provider.timeout_secs,
            },
        }
    }
}
