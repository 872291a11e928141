// Server startup - builds the engine, binds the listener, and serves until Ctrl+C

use crate::analytics::Analytics;
use crate::client::FreshserviceClient;
use crate::config::ClientConfig;
use crate::constants;
use crate::directory::DirectoryCache;
use crate::server::{Server, ServerConfig};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for server startup
pub struct StartupConfig {
    pub client: ClientConfig,
    pub host: String,
    pub port: u16,
    pub directory_ttl: Duration,
}

/// Build the shared engine for a client configuration
pub fn build_analytics(config: &StartupConfig) -> Result<Analytics<FreshserviceClient>> {
    let client = FreshserviceClient::new(&config.client).context("Failed to create API client")?;
    let cache = DirectoryCache::new(config.directory_ttl).with_page_size(config.client.page_size);
    Ok(Analytics::new(client, cache))
}

pub async fn start_server(config: StartupConfig) -> Result<()> {
    let analytics = Arc::new(build_analytics(&config)?);

    let addr = format!("{}:{}", config.host, config.port);
    let socket_addr: SocketAddr = addr.parse().context("Invalid address format")?;

    let server_config = ServerConfig::new(
        config.client.base_url.clone(),
        analytics.cache().ttl().as_secs(),
    );
    let server = Server::new(analytics, server_config);
    let app = server.router();

    let listener = tokio::net::TcpListener::bind(socket_addr)
        .await
        .context("Failed to bind to address")?;

    display_server_info(&addr, &config);
    eprintln!("\nPress Ctrl+C to stop\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
    }
}

fn display_server_info(addr: &str, config: &StartupConfig) {
    eprintln!("{} v{} HTTP server started", constants::BINARY_NAME, constants::VERSION);
    eprintln!("  Listening:     http://{}", addr);
    eprintln!("  Upstream:      {}", config.client.base_url);
    eprintln!("  Page size:     {}", config.client.page_size);
    eprintln!("  Directory TTL: {:?}", config.directory_ttl);
}
