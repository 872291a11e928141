// Typed read access to raw ticket records

use crate::constants;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Borrowed view over one ticket record. Every accessor tolerates missing or
/// mistyped fields.
#[derive(Debug, Clone, Copy)]
pub struct TicketView<'a>(&'a Value);

impl<'a> TicketView<'a> {
    pub fn new(record: &'a Value) -> Self {
        Self(record)
    }

    pub fn field(&self, name: &str) -> Option<&'a Value> {
        self.0.get(name)
    }

    pub fn status_code(&self) -> Option<i64> {
        self.0.get("status").and_then(Value::as_i64)
    }

    /// Responder id; 0 and null both mean unassigned
    pub fn responder_id(&self) -> Option<u64> {
        self.0
            .get("responder_id")
            .and_then(Value::as_u64)
            .filter(|id| *id != 0)
    }

    pub fn is_open(&self) -> bool {
        self.status_code() == Some(constants::STATUS_OPEN)
    }

    pub fn is_resolved(&self) -> bool {
        self.status_code() == Some(constants::STATUS_RESOLVED)
    }

    pub fn is_closed(&self) -> bool {
        self.status_code() == Some(constants::STATUS_CLOSED)
    }

    /// Hours from creation to resolution (or last update when no resolution time is
    /// recorded). `None` for tickets that are neither resolved nor closed, or whose
    /// timestamps are missing or unparsable.
    pub fn resolution_hours(&self) -> Option<f64> {
        if !(self.is_resolved() || self.is_closed()) {
            return None;
        }
        let created = self.timestamp_str("created_at")?;
        let finished = self
            .timestamp_str("resolved_at")
            .or_else(|| self.timestamp_str("updated_at"))?;

        let created = parse_timestamp(created)?;
        let finished = parse_timestamp(finished)?;
        Some((finished - created).num_milliseconds() as f64 / 3_600_000.0)
    }

    fn timestamp_str(&self, name: &str) -> Option<&'a str> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Parse RFC 3339 timestamps, plus offset-less datetimes and bare dates taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}

/// Resolution times of every resolved or closed ticket that has usable timestamps
pub fn resolution_times<'a>(tickets: impl IntoIterator<Item = &'a Value>) -> Vec<f64> {
    tickets
        .into_iter()
        .filter_map(|t| TicketView::new(t).resolution_hours())
        .collect()
}

/// Arithmetic mean, `None` for an empty list
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
