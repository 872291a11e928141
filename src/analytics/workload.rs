// Agent workload - per-responder ticket counts and resolution times
use super::filters::{self, DateRange, TicketFilter};
use super::labels::Label;
use super::ticket::{self, TicketView};
use crate::constants;
use crate::directory::LookupDirectory;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkloadRequest {
    pub agent_id: Option<u64>,
    pub group_id: Option<u64>,
    /// Relative window such as `30d`, used when `created_after` is absent
    pub period: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
}

impl WorkloadRequest {
    pub fn for_agent(agent_id: u64) -> Self {
        Self {
            agent_id: Some(agent_id),
            ..Default::default()
        }
    }

    pub fn for_group(group_id: u64) -> Self {
        Self {
            group_id: Some(group_id),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        match (self.agent_id, self.group_id) {
            (None, None) => Err(Error::validation("Either agent_id or group_id must be provided")),
            (Some(_), Some(_)) => Err(Error::validation(
                "Provide exactly one of agent_id or group_id",
            )),
            _ => Ok(()),
        }
    }

    /// Window start from `created_after`, else `now - period`; end defaults to now
    pub fn date_range(&self, now: DateTime<Utc>) -> Result<DateRange> {
        let days = match &self.created_after {
            Some(_) => 0,
            None => filters::parse_period(
                self.period
                    .as_deref()
                    .unwrap_or(constants::DEFAULT_WORKLOAD_PERIOD),
            )?,
        };
        DateRange::resolve(
            self.created_after.clone(),
            self.created_before.clone(),
            days,
            now,
        )
    }

    pub fn filter(&self, range: &DateRange) -> String {
        let filter = match self.agent_id {
            Some(agent_id) => TicketFilter::new().responder(Some(agent_id)),
            None => TicketFilter::new().group(self.group_id),
        };
        filter.window(range).build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentWorkload {
    pub agent_id: u64,
    pub agent_name: Label,
    pub email: Option<String>,
    pub tickets_assigned: usize,
    pub tickets_resolved: usize,
    pub tickets_closed: usize,
    pub tickets_open: usize,
    /// Mean of `resolution_times`, `None` when no ticket had usable timestamps
    pub avg_resolution_hours: Option<f64>,
    pub resolution_times: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkloadReport {
    pub agents: Vec<AgentWorkload>,
    pub date_range: DateRange,
    pub group_name: Option<Label>,
}

/// Group tickets by responder and compute per-agent counts. Unassigned tickets are
/// left out. Agents are ordered by assigned count, descending, keeping encounter
/// order on ties.
pub fn fold_workload(tickets: &[Value], directory: &LookupDirectory) -> Vec<AgentWorkload> {
    let mut order: Vec<u64> = Vec::new();
    let mut by_agent: HashMap<u64, Vec<&Value>> = HashMap::new();

    for record in tickets {
        let Some(agent_id) = TicketView::new(record).responder_id() else {
            continue;
        };
        by_agent
            .entry(agent_id)
            .or_insert_with(|| {
                order.push(agent_id);
                Vec::new()
            })
            .push(record);
    }

    let mut agents: Vec<AgentWorkload> = order
        .into_iter()
        .map(|agent_id| {
            let assigned = by_agent.remove(&agent_id).unwrap_or_default();
            let (mut resolved, mut closed, mut open) = (0, 0, 0);
            for record in &assigned {
                let view = TicketView::new(record);
                if view.is_resolved() {
                    resolved += 1;
                } else if view.is_closed() {
                    closed += 1;
                } else if view.is_open() {
                    open += 1;
                }
            }
            let resolution_times = ticket::resolution_times(assigned.iter().copied());

            AgentWorkload {
                agent_id,
                agent_name: directory.agent_label(agent_id),
                email: directory.agent_email(agent_id).map(String::from),
                tickets_assigned: assigned.len(),
                tickets_resolved: resolved,
                tickets_closed: closed,
                tickets_open: open,
                avg_resolution_hours: ticket::mean(&resolution_times),
                resolution_times,
            }
        })
        .collect();

    // sort_by is stable
    agents.sort_by(|a, b| b.tickets_assigned.cmp(&a.tickets_assigned));
    agents
}
