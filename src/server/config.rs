// Server configuration

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub version: String,
    /// API root the engine talks to, shown on `/` and `/status`
    pub upstream: String,
    pub directory_ttl_seconds: u64,
}

impl ServerConfig {
    pub fn new(upstream: impl Into<String>, directory_ttl_seconds: u64) -> Self {
        Self {
            version: crate::constants::VERSION.to_string(),
            upstream: upstream.into(),
            directory_ttl_seconds,
        }
    }
}
