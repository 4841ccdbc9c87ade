use crate::config::types::{Config, HarvestConfig, SelectorConfig, SourceConfig, UserAgentConfig};
use crate::harvest::ListingSelectors;
use crate::ConfigError;
use url::Url;

/// Upper bound on concurrent page fetches
pub const MAX_CONCURRENT_LIMIT: u32 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_harvest_config(&config.harvest)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_selector_config(&config.selectors)?;
    Ok(())
}

/// Validates the listing location
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;
    validate_http_url("origin", &config.origin)?;
    Ok(())
}

/// Validates page range and concurrency
fn validate_harvest_config(config: &HarvestConfig) -> Result<(), ConfigError> {
    if config.max_concurrent < 1 || config.max_concurrent > MAX_CONCURRENT_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_concurrent must be between 1 and {}, got {}",
            MAX_CONCURRENT_LIMIT, config.max_concurrent
        )));
    }

    if config.first_page < 1 {
        return Err(ConfigError::Validation(
            "first_page must be >= 1, got 0".to_string(),
        ));
    }

    if config.last_page < config.first_page {
        return Err(ConfigError::Validation(format!(
            "last_page ({}) must not be before first_page ({})",
            config.last_page, config.first_page
        )));
    }

    if config.page_timeout_ms == Some(0) {
        return Err(ConfigError::Validation(
            "page_timeout_ms must be > 0 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates that every selector compiles
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    ListingSelectors::compile(config).map(|_| ())
}

/// Validates an absolute http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_harvest_range() {
        let mut config = HarvestConfig::default();
        assert!(validate_harvest_config(&config).is_ok());

        config.first_page = 5;
        config.last_page = 5;
        assert!(validate_harvest_config(&config).is_ok());

        config.last_page = 4;
        assert!(validate_harvest_config(&config).is_err());

        config.first_page = 0;
        config.last_page = 4;
        assert!(validate_harvest_config(&config).is_err());
    }

    #[test]
    fn test_validate_max_concurrent() {
        let mut config = HarvestConfig::default();

        config.max_concurrent = 0;
        assert!(validate_harvest_config(&config).is_err());

        config.max_concurrent = 1;
        assert!(validate_harvest_config(&config).is_ok());

        config.max_concurrent = MAX_CONCURRENT_LIMIT;
        assert!(validate_harvest_config(&config).is_ok());

        config.max_concurrent = MAX_CONCURRENT_LIMIT + 1;
        assert!(validate_harvest_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = HarvestConfig {
            page_timeout_ms: Some(0),
            ..HarvestConfig::default()
        };
        assert!(validate_harvest_config(&config).is_err());
    }

    #[test]
    fn test_validate_source_urls() {
        let mut config = SourceConfig::default();
        assert!(validate_source_config(&config).is_ok());

        config.base_url = "not a url".to_string();
        assert!(matches!(
            validate_source_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));

        config.base_url = "ftp://example.com/news".to_string();
        assert!(validate_source_config(&config).is_err());
    }

    #[test]
    fn test_validate_crawler_name() {
        let mut config = UserAgentConfig::default();
        assert!(validate_user_agent_config(&config).is_ok());

        config.crawler_name = "Bad Name".to_string();
        assert!(validate_user_agent_config(&config).is_err());

        config.crawler_name = String::new();
        assert!(validate_user_agent_config(&config).is_err());
    }

    #[test]
    fn test_validate_bad_selector() {
        let config = SelectorConfig {
            item: "div[[".to_string(),
            ..SelectorConfig::default()
        };
        assert!(matches!(
            validate_selector_config(&config),
            Err(ConfigError::InvalidSelector(_))
        ));
    }
}
