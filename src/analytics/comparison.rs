// Team comparison - side-by-side group metrics
use super::filters::{DateRange, TicketFilter};
use super::labels::Label;
use super::stats::CountTable;
use super::ticket::{self, TicketView};
use crate::constants;
use crate::directory::LookupDirectory;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonRequest {
    pub group_ids: Vec<u64>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
}

impl ComparisonRequest {
    pub fn new(group_ids: Vec<u64>) -> Self {
        Self {
            group_ids,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.group_ids.len() < constants::MIN_COMPARISON_GROUPS {
            return Err(Error::validation(format!(
                "At least {} group_ids must be provided for comparison",
                constants::MIN_COMPARISON_GROUPS
            )));
        }
        if self.group_ids.len() > constants::MAX_COMPARISON_GROUPS {
            return Err(Error::validation(format!(
                "Maximum {} groups can be compared at once",
                constants::MAX_COMPARISON_GROUPS
            )));
        }
        Ok(())
    }

    pub fn date_range(&self, now: DateTime<Utc>) -> Result<DateRange> {
        DateRange::resolve(
            self.created_after.clone(),
            self.created_before.clone(),
            constants::DEFAULT_COMPARISON_DAYS,
            now,
        )
    }

    pub fn group_filter(group_id: u64, range: &DateRange) -> String {
        TicketFilter::new().group(Some(group_id)).window(range).build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentCount {
    pub agent_name: Label,
    pub ticket_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparison {
    pub group_id: u64,
    pub group_name: Label,
    pub total_tickets: usize,
    pub open_tickets: usize,
    pub resolved_tickets: usize,
    pub closed_tickets: usize,
    /// `(resolved + closed) / total`, 0.0 for an empty group
    pub closure_rate: f64,
    pub avg_resolution_hours: Option<f64>,
    pub top_agents: Vec<AgentCount>,
    pub by_status: CountTable,
    pub by_priority: CountTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub total_tickets_all_groups: usize,
    /// Unweighted mean of the groups' closure rates
    pub average_closure_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamComparison {
    pub comparison: Vec<GroupComparison>,
    pub date_range: DateRange,
    pub summary: ComparisonSummary,
}

impl TeamComparison {
    pub fn new(comparison: Vec<GroupComparison>, date_range: DateRange) -> Self {
        let summary = summarize(&comparison);
        Self {
            comparison,
            date_range,
            summary,
        }
    }
}

/// Metrics for one group's tickets
pub fn fold_group(group_id: u64, tickets: &[Value], directory: &LookupDirectory) -> GroupComparison {
    let stats = super::stats::fold_ticket_stats(tickets, directory);

    let (mut open, mut resolved, mut closed) = (0, 0, 0);
    // (agent id, count) in first-encounter order
    let mut agent_counts: Vec<(u64, usize)> = Vec::new();

    for record in tickets {
        let view = TicketView::new(record);
        if view.is_open() {
            open += 1;
        } else if view.is_resolved() {
            resolved += 1;
        } else if view.is_closed() {
            closed += 1;
        }

        if let Some(agent_id) = view.responder_id() {
            match agent_counts.iter_mut().find(|(id, _)| *id == agent_id) {
                Some((_, count)) => *count += 1,
                None => agent_counts.push((agent_id, 1)),
            }
        }
    }

    agent_counts.sort_by(|a, b| b.1.cmp(&a.1));
    let top_agents = agent_counts
        .into_iter()
        .take(constants::TOP_AGENTS)
        .map(|(agent_id, ticket_count)| AgentCount {
            agent_name: directory.agent_label(agent_id),
            ticket_count,
        })
        .collect();

    let total = tickets.len();
    GroupComparison {
        group_id,
        group_name: directory.group_label(group_id),
        total_tickets: total,
        open_tickets: open,
        resolved_tickets: resolved,
        closed_tickets: closed,
        closure_rate: closure_rate(resolved + closed, total),
        avg_resolution_hours: ticket::mean(&ticket::resolution_times(tickets)),
        top_agents,
        by_status: stats.by_status,
        by_priority: stats.by_priority,
    }
}

pub fn closure_rate(finished: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        finished as f64 / total as f64
    }
}

pub fn summarize(groups: &[GroupComparison]) -> ComparisonSummary {
    let rates: Vec<f64> = groups.iter().map(|g| g.closure_rate).collect();
    ComparisonSummary {
        total_tickets_all_groups: groups.iter().map(|g| g.total_tickets).sum(),
        average_closure_rate: ticket::mean(&rates).unwrap_or(0.0),
    }
}
