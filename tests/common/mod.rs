use anyhow::Result;
use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use freshstats::ClientConfig;

pub const API_KEY: &str = "test-key";
/// `Basic base64("test-key:X")`
const EXPECTED_AUTH: &str = "Basic dGVzdC1rZXk6WA==";
/// Fixed page size of the ticket filter endpoint
const FILTER_PAGE_SIZE: usize = 30;

/// In-process stand-in for the Freshservice v2 API
#[derive(Default)]
pub struct MockPlatform {
    pub agents: Vec<Value>,
    pub groups: Vec<Value>,
    /// Ticket sets keyed by a fragment the filter expression must contain
    pub tickets: Vec<(String, Vec<Value>)>,
    /// Advertise `rel="next"` links on agent and group pages
    pub link_headers: bool,
    /// Answer every ticket request with this status and body
    pub ticket_failure: Option<(u16, String)>,
    pub requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockPlatform {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.starts_with(path))
            .count()
    }
}

#[allow(dead_code)]
pub fn agent(id: u64, first: &str, last: &str, email: &str) -> Value {
    json!({ "id": id, "first_name": first, "last_name": last, "email": email })
}

#[allow(dead_code)]
pub fn group(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

/// `count` tickets for one responder; the first `resolved` are resolved after 6 hours
#[allow(dead_code)]
pub fn tickets(start_id: u64, count: usize, resolved: usize, responder: u64) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": start_id + i as u64,
                "subject": format!("Ticket {}", start_id + i as u64),
                "status": if i < resolved { 4 } else { 2 },
                "priority": 2,
                "type": "Incident",
                "responder_id": responder,
                "created_at": "2024-05-01T08:00:00Z",
                "resolved_at": if i < resolved { json!("2024-05-01T14:00:00Z") } else { Value::Null },
                "updated_at": "2024-05-02T08:00:00Z",
            })
        })
        .collect()
}

#[allow(dead_code)]
pub fn client_config(base_url: &str) -> ClientConfig {
    ClientConfig::with_base_url(base_url, API_KEY)
}

/// Start the mock on an ephemeral port and return its API root
pub async fn start_mock_platform(
    platform: MockPlatform,
) -> Result<(String, Arc<MockPlatform>, tokio::task::JoinHandle<()>)> {
    let platform = Arc::new(platform);
    let app = Router::new()
        .route("/api/v2/tickets/filter", get(handle_filter))
        .route("/api/v2/agents", get(handle_agents))
        .route("/api/v2/groups", get(handle_groups))
        .with_state(Arc::clone(&platform));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok((format!("http://{}/api/v2", addr), platform, handle))
}

/// Serve a freshstats router on an ephemeral port
#[cfg(feature = "server")]
#[allow(dead_code)]
pub async fn start_test_server(router: Router) -> Result<(String, tokio::task::JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok((format!("http://{}", addr), handle))
}

fn record(platform: &MockPlatform, uri: &Uri) {
    let entry = match uri.query() {
        Some(q) => format!("{}?{}", uri.path(), q),
        None => uri.path().to_string(),
    };
    platform.requests.lock().unwrap().push(entry);
}

fn unauthorized(headers: &HeaderMap) -> Option<Response> {
    let auth = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());
    if auth == Some(EXPECTED_AUTH) {
        None
    } else {
        Some(
            (
                StatusCode::UNAUTHORIZED,
                axum::Json(json!({ "code": "access_denied", "message": "You have to be logged in" })),
            )
                .into_response(),
        )
    }
}

fn page_number(params: &HashMap<String, String>) -> usize {
    params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .max(1)
}

fn slice(records: &[Value], page: usize, per_page: usize) -> Vec<Value> {
    records
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect()
}

async fn handle_filter(
    State(platform): State<Arc<MockPlatform>>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&platform, &uri);
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    if let Some((status, body)) = &platform.ticket_failure {
        let status = StatusCode::from_u16(*status).unwrap();
        return (status, body.clone()).into_response();
    }

    let raw = params.get("query").cloned().unwrap_or_default();
    // the real endpoint answers unquoted expressions with a server error
    let Some(filter) = raw.strip_prefix('"').and_then(|q| q.strip_suffix('"')) else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "message": "query must be enclosed in double quotes" })),
        )
            .into_response();
    };

    let records = platform
        .tickets
        .iter()
        .filter(|(fragment, _)| filter.contains(fragment.as_str()))
        .max_by_key(|(fragment, _)| fragment.len())
        .map(|(_, records)| records.as_slice())
        .unwrap_or(&[]);

    let page = slice(records, page_number(&params), FILTER_PAGE_SIZE);
    axum::Json(json!({ "tickets": page })).into_response()
}

async fn handle_agents(
    State(platform): State<Arc<MockPlatform>>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    list_page(&platform, &uri, &headers, &params, "agents", &platform.agents)
}

async fn handle_groups(
    State(platform): State<Arc<MockPlatform>>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    list_page(&platform, &uri, &headers, &params, "groups", &platform.groups)
}

fn list_page(
    platform: &MockPlatform,
    uri: &Uri,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
    key: &str,
    records: &[Value],
) -> Response {
    record(platform, uri);
    if let Some(denied) = unauthorized(headers) {
        return denied;
    }

    let page = page_number(params);
    let per_page: usize = params
        .get("per_page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(30);
    let body = axum::Json(json!({ key: slice(records, page, per_page) }));

    let has_more = page * per_page < records.len();
    if platform.link_headers && has_more {
        let link = format!(
            "<https://acme.freshservice.com/api/v2/{}?per_page={}&page={}>; rel=\"next\"",
            key,
            per_page,
            page + 1
        );
        return ([(header::LINK, link)], body).into_response();
    }
    body.into_response()
}
