// Route setup and configuration

use crate::server::ServerState;
use crate::server::error::not_found;
use crate::server::handle_analytics::{
    handle_lookup, handle_search, handle_team_comparison, handle_ticket_stats, handle_workload,
};
use crate::server::handle_root::handle_root;
use crate::server::handle_status::handle_status;
use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/status", get(handle_status))
        .route("/lookup", get(handle_lookup))
        .route("/tickets/search", get(handle_search))
        .route("/stats/tickets", get(handle_ticket_stats))
        .route("/stats/workload", get(handle_workload))
        .route("/stats/teams", get(handle_team_comparison))
        .fallback(|| async { not_found("Unknown endpoint") })
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}
