// Filter expressions and date windows for ticket queries

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Format used for bounds computed from "now"
const BOUND_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Builder for `field:value AND field:>'date'` expressions
#[derive(Debug, Default, Clone)]
pub struct TicketFilter {
    parts: Vec<String>,
}

impl TicketFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(mut self, group_id: Option<u64>) -> Self {
        if let Some(id) = group_id {
            self.parts.push(format!("group_id:{}", id));
        }
        self
    }

    pub fn responder(mut self, agent_id: Option<u64>) -> Self {
        if let Some(id) = agent_id {
            self.parts.push(format!("responder_id:{}", id));
        }
        self
    }

    pub fn created_after(mut self, date: Option<&str>) -> Self {
        if let Some(date) = date {
            self.parts.push(format!("created_at:>'{}'", date));
        }
        self
    }

    pub fn created_before(mut self, date: Option<&str>) -> Self {
        if let Some(date) = date {
            self.parts.push(format!("created_at:<'{}'", date));
        }
        self
    }

    pub fn window(self, range: &DateRange) -> Self {
        self.created_after(range.start.as_deref())
            .created_before(range.end.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn build(&self) -> String {
        self.parts.join(" AND ")
    }
}

/// Creation-date window echoed back with every report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    /// Window ending at `created_before` (or now) and starting at `created_after`
    /// (or `default_days` before now). A start before the earliest representable
    /// date is a validation error.
    pub fn resolve(
        created_after: Option<String>,
        created_before: Option<String>,
        default_days: i64,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let start = match created_after {
            Some(start) => start,
            None => format_bound(days_before(now, default_days)?),
        };
        Ok(Self {
            start: Some(start),
            end: Some(created_before.unwrap_or_else(|| format_bound(now))),
        })
    }
}

fn days_before(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .ok_or_else(|| Error::validation(format!("Period of {} days reaches too far back", days)))
}

pub fn format_bound(ts: DateTime<Utc>) -> String {
    ts.format(BOUND_FORMAT).to_string()
}

/// Parse a relative period such as `7d`, `30d`, `90d` into a day count
pub fn parse_period(period: &str) -> Result<i64> {
    let invalid = || {
        Error::validation(format!(
            "Invalid period format: {}. Use format like '7d', '30d', '90d'",
            period
        ))
    };

    let days = period.trim().strip_suffix('d').ok_or_else(invalid)?;
    let days: i64 = days.parse().map_err(|_| invalid())?;
    if days < 0 {
        return Err(invalid());
    }
    Ok(days)
}
