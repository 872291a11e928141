// Shared utility functions for CLI commands

use anyhow::{Context, Result};
use clap::{Args, ValueHint};
use freshstats::{
    Analytics, ClientConfig, DirectoryCache, FreshserviceClient, constants, response,
};
use serde::Serialize;
use std::time::Duration;

/// Where and how to reach the Freshservice API
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Freshservice domain, e.g. acme.freshservice.com
    #[arg(long, global = true, env = constants::ENV_DOMAIN, help_heading = "Connection")]
    pub domain: Option<String>,

    /// Freshservice API key
    #[arg(long, global = true, env = constants::ENV_API_KEY, hide_env_values = true, help_heading = "Connection")]
    pub api_key: Option<String>,

    /// Full API root, overriding --domain (e.g. http://localhost:9000/api/v2)
    #[arg(long, global = true, value_hint = ValueHint::Url, help_heading = "Connection")]
    pub base_url: Option<String>,

    /// Expected page size of list endpoints
    #[arg(long, global = true, default_value_t = constants::DEFAULT_PAGE_SIZE, help_heading = "Connection")]
    pub page_size: usize,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = constants::HTTP_TIMEOUT_SECS, help_heading = "Connection")]
    pub timeout: u64,
}

impl ConnectionArgs {
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self.api_key.clone().with_context(|| {
            format!("API key missing: pass --api-key or set {}", constants::ENV_API_KEY)
        })?;

        let config = match (&self.base_url, &self.domain) {
            (Some(base_url), _) => ClientConfig::with_base_url(base_url.as_str(), api_key),
            (None, Some(domain)) => ClientConfig::for_domain(domain, api_key),
            (None, None) => anyhow::bail!(
                "Domain missing: pass --domain, --base-url, or set {}",
                constants::ENV_DOMAIN
            ),
        };

        let config = config
            .page_size(self.page_size)
            .timeout(Duration::from_secs(self.timeout));
        config.validate()?;
        Ok(config)
    }

    /// Engine with a fresh directory cache; one per CLI invocation
    pub fn analytics(&self) -> Result<Analytics<FreshserviceClient>> {
        let config = self.client_config()?;
        let client = FreshserviceClient::new(&config)?;
        let cache = DirectoryCache::default().with_page_size(config.page_size);
        Ok(Analytics::new(client, cache))
    }
}

/// Output settings shared by every command
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub compact: bool,
}

impl Output {
    /// Print the envelope for a result to stdout. Failures are printed too and then
    /// returned so the process exits non-zero.
    pub fn emit<T: Serialize>(&self, result: freshstats::Result<T>) -> Result<()> {
        let body = response::envelope(&result);
        let text = if self.compact {
            serde_json::to_string(&body)?
        } else {
            serde_json::to_string_pretty(&body)?
        };
        println!("{}", text);

        result.map(|_| ()).map_err(anyhow::Error::from)
    }
}

/// Run an async operation to completion on a fresh runtime
pub fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    Ok(rt.block_on(future))
}
