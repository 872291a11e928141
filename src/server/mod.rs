// HTTP server exposing the analytics operations as JSON endpoints
//
// Every endpoint answers with the same `{"success": ...}` envelope the CLI prints.
// Validation failures map to 400, upstream failures to 502.

mod config;
mod error;
mod handle_analytics;
mod handle_root;
mod handle_status;
mod routes;
mod startup;

use crate::analytics::Analytics;
use crate::client::FreshserviceClient;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;

pub use config::ServerConfig;
pub use routes::create_router;
pub use startup::{StartupConfig, start_server};

/// Engine type served over HTTP
pub type ServerAnalytics = Analytics<FreshserviceClient>;

#[derive(Clone)]
pub struct ServerState {
    pub analytics: Arc<ServerAnalytics>,
    pub config: ServerConfig,
    pub start_time: Instant,
}

pub struct Server {
    analytics: Arc<ServerAnalytics>,
    config: ServerConfig,
    start_time: Instant,
}

impl Server {
    pub fn new(analytics: Arc<ServerAnalytics>, config: ServerConfig) -> Self {
        Self {
            analytics,
            config,
            start_time: Instant::now(),
        }
    }

    pub fn router(&self) -> Router {
        create_router(ServerState {
            analytics: Arc::clone(&self.analytics),
            config: self.config.clone(),
            start_time: self.start_time,
        })
    }
}
