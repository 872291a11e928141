// Root page handler

use crate::constants;
use crate::server::ServerState;
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};

pub async fn handle_root(State(state): State<ServerState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed();

    let mut response = String::new();
    response.push_str(&format!(
        "{} v{} - Freshservice ticket analytics\n\n",
        constants::BINARY_NAME,
        state.config.version
    ));
    response.push_str("Server\n");
    response.push_str("━━━━━━\n");
    response.push_str(&format!("  Upstream:      {}\n", state.config.upstream));
    response.push_str(&format!(
        "  Directory TTL: {}s\n",
        state.config.directory_ttl_seconds
    ));
    response.push_str(&format!("  Uptime:        {}s\n\n", uptime.as_secs()));

    response.push_str("Endpoints\n");
    response.push_str("━━━━━━━━━\n");
    response.push_str("  GET /status            Server status\n");
    response.push_str("  GET /lookup            Agent and group directories\n");
    response.push_str("  GET /tickets/search    ?query=&max_results=&fields=&workspace_id=\n");
    response.push_str("  GET /stats/tickets     ?group_id=&created_after=&created_before=&workspace_id=\n");
    response.push_str("  GET /stats/workload    ?agent_id=|group_id=&period=&created_after=&created_before=\n");
    response.push_str("  GET /stats/teams       ?group_ids=1,2,3&created_after=&created_before=\n");

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        response,
    )
}
