// Ticket statistics - counts by status, priority, agent, and type
use super::filters::{DateRange, TicketFilter};
use super::labels::{self, Label};
use super::ticket::TicketView;
use crate::directory::LookupDirectory;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Label → ticket count, ordered by label
pub type CountTable = BTreeMap<Label, usize>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsRequest {
    pub group_id: Option<u64>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub workspace_id: Option<u64>,
}

impl StatsRequest {
    /// A request must narrow the ticket set by group or by creation date
    pub fn validate(&self) -> Result<()> {
        if self.group_id.is_none() && self.created_after.is_none() && self.created_before.is_none() {
            return Err(Error::validation(
                "At least one filter parameter must be provided (group_id, created_after, or created_before)",
            ));
        }
        Ok(())
    }

    pub fn filter(&self) -> String {
        TicketFilter::new()
            .group(self.group_id)
            .created_after(self.created_after.as_deref())
            .created_before(self.created_before.as_deref())
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketStats {
    pub total_tickets: usize,
    pub by_status: CountTable,
    pub by_priority: CountTable,
    pub by_agent: CountTable,
    pub by_type: CountTable,
}

/// Filter echo returned next to the counts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsFilters {
    pub group_id: Option<u64>,
    pub group_name: Option<Label>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub workspace_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketStatsReport {
    pub stats: TicketStats,
    pub filters: StatsFilters,
    pub date_range: DateRange,
}

impl TicketStatsReport {
    pub fn new(request: &StatsRequest, stats: TicketStats, directory: &LookupDirectory) -> Self {
        Self {
            stats,
            filters: StatsFilters {
                group_id: request.group_id,
                group_name: request.group_id.map(|id| directory.group_label(id)),
                created_after: request.created_after.clone(),
                created_before: request.created_before.clone(),
                workspace_id: request.workspace_id,
            },
            date_range: DateRange {
                start: request.created_after.clone(),
                end: request.created_before.clone(),
            },
        }
    }
}

/// Fold tickets into count tables. Every ticket lands in exactly one bucket of
/// each table, so each table sums to the total.
pub fn fold_ticket_stats(tickets: &[Value], directory: &LookupDirectory) -> TicketStats {
    let mut stats = TicketStats {
        total_tickets: tickets.len(),
        ..Default::default()
    };

    for record in tickets {
        let ticket = TicketView::new(record);

        *stats
            .by_status
            .entry(labels::status_label(ticket.field("status")))
            .or_default() += 1;
        *stats
            .by_priority
            .entry(labels::priority_label(ticket.field("priority")))
            .or_default() += 1;

        let agent = match ticket.responder_id() {
            Some(id) => directory.agent_label(id),
            None => Label::unassigned(),
        };
        *stats.by_agent.entry(agent).or_default() += 1;

        *stats
            .by_type
            .entry(labels::type_label(ticket.field("type")))
            .or_default() += 1;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::AgentEntry;
    use serde_json::json;

    fn directory() -> LookupDirectory {
        let mut directory = LookupDirectory::empty();
        directory.agents.insert(
            7,
            AgentEntry {
                name: "Ada Lovelace".into(),
                email: Some("ada@example.com".into()),
            },
        );
        directory.groups.insert(3, Label::Named("Service Desk".into()));
        directory
    }

    fn tickets() -> Vec<Value> {
        vec![
            json!({ "id": 1, "status": 2, "priority": 1, "responder_id": 7, "type": "Incident" }),
            json!({ "id": 2, "status": 4, "priority": 3, "responder_id": 8, "type": "Service Request" }),
            json!({ "id": 3, "status": 9, "priority": 4, "responder_id": null, "type": "" }),
            json!({ "id": 4, "status": 2, "priority": 8, "responder_id": 7 }),
        ]
    }

    #[test]
    fn test_fold_labels() {
        let stats = fold_ticket_stats(&tickets(), &directory());

        assert_eq!(stats.total_tickets, 4);
        assert_eq!(stats.by_status[&Label::Named("Open".into())], 2);
        assert_eq!(stats.by_status[&Label::Synthesized("Status-9".into())], 1);
        assert_eq!(stats.by_priority[&Label::Synthesized("Priority-8".into())], 1);
        assert_eq!(stats.by_agent[&Label::Named("Ada Lovelace".into())], 2);
        assert_eq!(stats.by_agent[&Label::agent_fallback(8)], 1);
        assert_eq!(stats.by_agent[&Label::unassigned()], 1);
        assert_eq!(stats.by_type[&Label::unknown_type()], 2);
    }

    #[test]
    fn test_every_table_sums_to_total() {
        let stats = fold_ticket_stats(&tickets(), &directory());
        for table in [&stats.by_status, &stats.by_priority, &stats.by_agent, &stats.by_type] {
            assert_eq!(table.values().sum::<usize>(), stats.total_tickets);
        }
    }

    #[test]
    fn test_serialized_tables_sum_to_total() {
        let mut directory = directory();
        directory.agents.insert(
            9,
            AgentEntry {
                name: "Unassigned".into(),
                email: None,
            },
        );
        let tickets = vec![
            json!({ "id": 1, "status": 2, "priority": 1, "responder_id": 9, "type": "Unknown" }),
            json!({ "id": 2, "status": 2, "priority": 1, "responder_id": null }),
            json!({ "id": 3, "status": 2, "priority": 1, "responder_id": 8, "type": "Agent-8" }),
        ];

        let stats = serde_json::to_value(fold_ticket_stats(&tickets, &directory)).unwrap();
        for table in ["by_status", "by_priority", "by_agent", "by_type"] {
            let sum: u64 = stats[table]
                .as_object()
                .unwrap()
                .values()
                .map(|v| v.as_u64().unwrap())
                .sum();
            assert_eq!(sum, 3, "{}", table);
        }
        assert_eq!(stats["by_type"]["Unknown"], 2);
        assert_eq!(stats["by_agent"]["Unassigned"], 2);
    }

    #[test]
    fn test_fold_ignores_page_order() {
        let mut reversed = tickets();
        reversed.reverse();
        let a = serde_json::to_string(&fold_ticket_stats(&tickets(), &directory())).unwrap();
        let b = serde_json::to_string(&fold_ticket_stats(&reversed, &directory())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_request_requires_a_filter() {
        assert!(StatsRequest::default().validate().unwrap_err().is_validation());

        let request = StatsRequest {
            group_id: Some(3),
            created_after: Some("2024-01-01".into()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.filter(), "group_id:3 AND created_at:>'2024-01-01'");
    }

    #[test]
    fn test_report_echoes_group_name() {
        let request = StatsRequest {
            group_id: Some(3),
            ..Default::default()
        };
        let report = TicketStatsReport::new(&request, TicketStats::default(), &directory());
        assert_eq!(report.filters.group_name, Some(Label::Named("Service Desk".into())));
        assert_eq!(report.date_range, DateRange::default());
    }
}
