use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Provider timeout is not 0
/// - Provider base URL, when set, is an http(s) URL
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.provider.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "provider.timeout_secs cannot be 0".to_string(),
        ));
    }

    if let Some(url) = &config.provider.base_url {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "provider.base_url must be an http(s) URL, got '{}'",
                url
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProviderConfig, ServerConfig};
    use std::net::IpAddr;

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".parse::<IpAddr>().unwrap(),
                port: 0,
            },
            provider: ProviderConfig::default(),
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_timeout_zero_fails() {
        let mut config = Config::default();
        config.provider.timeout_secs = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default();
        config.provider.base_url = Some("ftp://anidex.info".to_string());
        assert!(validate_config(&config).is_err());

        config.provider.base_url = Some("https://mirror.example".to_string());
        assert!(validate_config(&config).is_ok());
    }
}
