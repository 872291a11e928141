// Analytics engine - directory lookups, ticket searches, and aggregate reports
//
// Every operation validates its input before touching the network, resolves the
// agent/group directory through the shared cache, walks the matching tickets, and
// folds them into a report.

pub mod comparison;
pub mod filters;
pub mod labels;
pub mod stats;
pub mod ticket;
pub mod workload;

use crate::client::{CollectionQuery, PageSource};
use crate::constants;
use crate::directory::{DirectoryCache, DirectorySnapshot};
use crate::error::{Error, Result};
use crate::walker::{self, CollectionResult, WalkLimit, WalkRequest};
use chrono::Utc;
use serde::Deserialize;

pub use comparison::{ComparisonRequest, TeamComparison};
pub use labels::Label;
pub use stats::{StatsRequest, TicketStatsReport};
pub use workload::{WorkloadReport, WorkloadRequest};

/// Bounded ticket search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    /// Filter expression, e.g. `status:2 AND priority:4`
    pub query: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    #[serde(default)]
    pub workspace_id: Option<u64>,
}

fn default_max_results() -> usize {
    constants::DEFAULT_MAX_RESULTS
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: constants::DEFAULT_MAX_RESULTS,
            fields: None,
            workspace_id: None,
        }
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Aggregation engine over any page source, with an injected directory cache
pub struct Analytics<S> {
    source: S,
    cache: DirectoryCache,
}

impl<S: PageSource> Analytics<S> {
    pub fn new(source: S, cache: DirectoryCache) -> Self {
        Self { source, cache }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &DirectoryCache {
        &self.cache
    }

    /// Current agent and group directories
    pub async fn lookup(&self) -> Result<DirectorySnapshot> {
        self.cache.get(&self.source).await
    }

    /// Capped ticket search; `max_results` below 1 is rejected and above the
    /// ceiling is clamped
    pub async fn search_tickets(&self, request: &SearchRequest) -> Result<CollectionResult> {
        if request.query.trim().is_empty() {
            return Err(Error::validation("query cannot be empty"));
        }
        let limit = WalkLimit::capped(request.max_results)?;
        let walk = WalkRequest::new(
            CollectionQuery::tickets(request.query.clone()).workspace(request.workspace_id),
            constants::FILTER_PAGE_SIZE,
            limit,
        )
        .fields(request.fields.clone());

        walker::collect(&self.source, &walk).await
    }

    pub async fn ticket_stats(&self, request: &StatsRequest) -> Result<TicketStatsReport> {
        request.validate()?;
        let directory = self.directory().await?;

        let query = CollectionQuery::tickets(request.filter()).workspace(request.workspace_id);
        let tickets = self.drain(query).await?;
        log::info!("Computing statistics over {} tickets", tickets.total_fetched);

        let stats = stats::fold_ticket_stats(&tickets.records, &directory.directory);
        Ok(TicketStatsReport::new(request, stats, &directory.directory))
    }

    pub async fn agent_workload(&self, request: &WorkloadRequest) -> Result<WorkloadReport> {
        request.validate()?;
        let date_range = request.date_range(Utc::now())?;
        let directory = self.directory().await?;

        let tickets = self
            .drain(CollectionQuery::tickets(request.filter(&date_range)))
            .await?;
        log::info!("Computing workload over {} tickets", tickets.total_fetched);

        Ok(WorkloadReport {
            agents: workload::fold_workload(&tickets.records, &directory.directory),
            group_name: request.group_id.map(|id| directory.directory.group_label(id)),
            date_range,
        })
    }

    /// Compare 2 to 10 groups over the same window. Groups are walked concurrently
    /// and one failed group fails the comparison.
    pub async fn team_comparison(&self, request: &ComparisonRequest) -> Result<TeamComparison> {
        request.validate()?;
        let date_range = request.date_range(Utc::now())?;
        let snapshot = self.directory().await?;
        let directory = snapshot.directory.as_ref();

        let walks = request.group_ids.iter().map(|&group_id| {
            let query = CollectionQuery::tickets(ComparisonRequest::group_filter(group_id, &date_range));
            async move {
                let tickets = self
                    .drain(query)
                    .await
                    .map_err(|e| e.with_context(&format!("group {}", group_id)))?;
                Ok::<_, Error>(comparison::fold_group(
                    group_id,
                    &tickets.records,
                    directory,
                ))
            }
        });
        let groups = futures_util::future::try_join_all(walks).await?;

        Ok(TeamComparison::new(groups, date_range))
    }

    async fn directory(&self) -> Result<DirectorySnapshot> {
        self.cache
            .get(&self.source)
            .await
            .map_err(|e| Error::Directory(Box::new(e)))
    }

    async fn drain(&self, query: CollectionQuery) -> Result<CollectionResult> {
        walker::collect(&self.source, &WalkRequest::drain(query, constants::FILTER_PAGE_SIZE)).await
    }
}
