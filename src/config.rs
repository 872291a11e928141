// Client configuration - API location, credentials, page size, and timeouts

use crate::constants;
use crate::error::{Error, Result};
use std::time::Duration;

/// Connection settings for the Freshservice API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://acme.freshservice.com/api/v2`
    pub base_url: String,
    pub api_key: String,
    /// Sent as `per_page` to the agent and group endpoints and used as their
    /// short-page threshold. Filtered ticket walks always use 30.
    pub page_size: usize,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration for a Freshservice domain such as `acme.freshservice.com`
    pub fn for_domain(domain: &str, api_key: impl Into<String>) -> Self {
        Self::with_base_url(constants::api_base_url(domain), api_key)
    }

    /// Configuration for an explicit API root (used by tests and proxies)
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            page_size: constants::DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(constants::HTTP_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `FRESHSERVICE_DOMAIN` (required)
    /// - `FRESHSERVICE_APIKEY` (required)
    pub fn from_env() -> Result<Self> {
        let domain = std::env::var(constants::ENV_DOMAIN)
            .map_err(|_| Error::validation(format!("{} is not set", constants::ENV_DOMAIN)))?;
        let api_key = std::env::var(constants::ENV_API_KEY)
            .map_err(|_| Error::validation(format!("{} is not set", constants::ENV_API_KEY)))?;
        let config = Self::for_domain(&domain, api_key);
        config.validate()?;
        Ok(config)
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::validation("API base URL cannot be empty"));
        }
        if self.api_key.is_empty() {
            return Err(Error::validation("API key cannot be empty"));
        }
        if self.page_size < 1 || self.page_size > constants::MAX_PAGE_SIZE {
            return Err(Error::validation(format!(
                "page_size must be between 1 and {}",
                constants::MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::for_domain("acme.freshservice.com", "key");
        assert_eq!(config.base_url, "https://acme.freshservice.com/api/v2");
        assert_eq!(config.page_size, 30);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:9000/api/v2/", "key");
        assert_eq!(config.base_url, "http://127.0.0.1:9000/api/v2");
    }

    #[test]
    fn test_invalid_page_size() {
        let config = ClientConfig::for_domain("acme.freshservice.com", "key").page_size(0);
        assert!(config.validate().unwrap_err().is_validation());
        let config = ClientConfig::for_domain("acme.freshservice.com", "key").page_size(101);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_key_rejected() {
        let config = ClientConfig::for_domain("acme.freshservice.com", "");
        assert!(config.validate().is_err());
    }
}
