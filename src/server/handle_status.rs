// Status handler

use crate::constants;
use crate::server::ServerState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn handle_status(State(state): State<ServerState>) -> impl IntoResponse {
    let response = json!({
        "success": true,
        "server": {
            "name": constants::BINARY_NAME,
            "version": state.config.version,
            "uptime_seconds": state.start_time.elapsed().as_secs(),
            "upstream": state.config.upstream,
        },
        "directory": {
            "ttl_seconds": state.config.directory_ttl_seconds,
        },
        "limits": {
            "default_max_results": constants::DEFAULT_MAX_RESULTS,
            "max_results_ceiling": constants::MAX_RESULTS_CEILING,
            "max_comparison_groups": constants::MAX_COMPARISON_GROUPS,
        }
    });

    (StatusCode::OK, axum::Json(response))
}
