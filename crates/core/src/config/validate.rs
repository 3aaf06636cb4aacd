use reqwest::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Backend URL parses as an absolute http(s) URL
/// - Refresh interval is not 0
/// - Timeout, when set, is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let url = Url::parse(&config.backend.base_url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "backend.base_url {:?} is not a valid URL: {}",
            config.backend.base_url, e
        ))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::ValidationError(format!(
            "backend.base_url must use http or https, got {}",
            url.scheme()
        )));
    }

    if config.ticket.refresh_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "ticket.refresh_interval_ms cannot be 0".to_string(),
        ));
    }

    if config.backend.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "backend.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
