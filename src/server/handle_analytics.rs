// Lookup, search, and report handlers

use crate::analytics::{ComparisonRequest, SearchRequest, StatsRequest, WorkloadRequest};
use crate::constants;
use crate::error::{Error, Result};
use crate::server::ServerState;
use crate::server::error::respond;
use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Response,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub max_results: Option<usize>,
    /// Comma-separated field list
    pub fields: Option<String>,
    pub workspace_id: Option<u64>,
}

impl From<SearchParams> for SearchRequest {
    fn from(params: SearchParams) -> Self {
        SearchRequest {
            query: params.query,
            max_results: params.max_results.unwrap_or(constants::DEFAULT_MAX_RESULTS),
            fields: params.fields.map(|f| split_list(&f)),
            workspace_id: params.workspace_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamParams {
    /// Comma-separated group ids
    pub group_ids: String,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
}

impl TeamParams {
    fn into_request(self) -> Result<ComparisonRequest> {
        let group_ids = split_list(&self.group_ids)
            .iter()
            .map(|id| {
                id.parse::<u64>()
                    .map_err(|_| Error::validation(format!("Invalid group id: {}", id)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ComparisonRequest {
            group_ids,
            created_after: self.created_after,
            created_before: self.created_before,
        })
    }
}

/// Query extraction result; a malformed query string is a validation failure
type QueryParams<T> = std::result::Result<Query<T>, QueryRejection>;

fn params<T>(query: QueryParams<T>) -> Result<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| Error::validation(rejection.body_text()))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub async fn handle_lookup(State(state): State<ServerState>) -> Response {
    respond(state.analytics.lookup().await)
}

pub async fn handle_search(
    State(state): State<ServerState>,
    query: QueryParams<SearchParams>,
) -> Response {
    let result = match params(query) {
        Ok(search) => state.analytics.search_tickets(&search.into()).await,
        Err(e) => Err(e),
    };
    respond(result)
}

pub async fn handle_ticket_stats(
    State(state): State<ServerState>,
    query: QueryParams<StatsRequest>,
) -> Response {
    let result = match params(query) {
        Ok(request) => state.analytics.ticket_stats(&request).await,
        Err(e) => Err(e),
    };
    respond(result)
}

pub async fn handle_workload(
    State(state): State<ServerState>,
    query: QueryParams<WorkloadRequest>,
) -> Response {
    let result = match params(query) {
        Ok(request) => state.analytics.agent_workload(&request).await,
        Err(e) => Err(e),
    };
    respond(result)
}

pub async fn handle_team_comparison(
    State(state): State<ServerState>,
    query: QueryParams<TeamParams>,
) -> Response {
    let result = match params(query).and_then(TeamParams::into_request) {
        Ok(request) => state.analytics.team_comparison(&request).await,
        Err(e) => Err(e),
    };
    respond(result)
}
