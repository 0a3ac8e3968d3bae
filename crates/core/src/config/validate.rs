use url::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Debounce interval is not 0
/// - Feed endpoint is a well-formed http(s) URL
/// - Request timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.search.debounce_ms == 0 {
        return Err(ConfigError::ValidationError(
            "search.debounce_ms cannot be 0".to_string(),
        ));
    }

    let endpoint = Url::parse(&config.feed.endpoint).map_err(|e| {
        ConfigError::ValidationError(format!("feed.endpoint is not a valid URL: {}", e))
    })?;
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(
            "feed.endpoint must be an http(s) URL".to_string(),
        ));
    }

    if config.feed.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "feed.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
