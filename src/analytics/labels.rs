// Display labels for ids found in ticket records

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A humanized id: either a real name from a table or directory, or a fallback
/// built from the raw id.
///
/// Equality, ordering, and hashing look only at the text, so a real name and a
/// fallback that read the same share one bucket in a count table.
#[derive(Debug, Clone)]
pub enum Label {
    Named(String),
    Synthesized(String),
}

impl Label {
    pub fn as_str(&self) -> &str {
        match self {
            Label::Named(s) | Label::Synthesized(s) => s,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self, Label::Synthesized(_))
    }

    pub fn unassigned() -> Self {
        Label::Synthesized("Unassigned".into())
    }

    pub fn unknown_type() -> Self {
        Label::Synthesized("Unknown".into())
    }

    pub fn agent_fallback(id: u64) -> Self {
        Label::Synthesized(format!("Agent-{}", id))
    }

    pub fn group_fallback(id: u64) -> Self {
        Label::Synthesized(format!("Group-{}", id))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Label {}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

// Serialized as a plain string so labels can key JSON objects
impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open = 2,
    Pending = 3,
    Resolved = 4,
    Closed = 5,
    InProgress = 6,
    PendingReturn = 7,
}

impl TicketStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            2 => Some(TicketStatus::Open),
            3 => Some(TicketStatus::Pending),
            4 => Some(TicketStatus::Resolved),
            5 => Some(TicketStatus::Closed),
            6 => Some(TicketStatus::InProgress),
            7 => Some(TicketStatus::PendingReturn),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::Pending => "Pending",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::PendingReturn => "Pending Return",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketPriority {
    Low = 1,
    Medium = 2,
    High = 3,
    Urgent = 4,
}

impl TicketPriority {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(TicketPriority::Low),
            2 => Some(TicketPriority::Medium),
            3 => Some(TicketPriority::High),
            4 => Some(TicketPriority::Urgent),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TicketPriority::Low => "Low",
            TicketPriority::Medium => "Medium",
            TicketPriority::High => "High",
            TicketPriority::Urgent => "Urgent",
        }
    }
}

/// `Open`, `Closed`, ... or `Status-<raw>` for codes outside the table
pub fn status_label(raw: Option<&Value>) -> Label {
    match raw.and_then(Value::as_i64).and_then(TicketStatus::from_code) {
        Some(status) => Label::Named(status.name().into()),
        None => Label::Synthesized(format!("Status-{}", raw_id(raw))),
    }
}

/// `Low` .. `Urgent` or `Priority-<raw>` for codes outside the table
pub fn priority_label(raw: Option<&Value>) -> Label {
    match raw.and_then(Value::as_i64).and_then(TicketPriority::from_code) {
        Some(priority) => Label::Named(priority.name().into()),
        None => Label::Synthesized(format!("Priority-{}", raw_id(raw))),
    }
}

/// Ticket type as sent, or `Unknown` when missing or blank
pub fn type_label(raw: Option<&Value>) -> Label {
    match raw.and_then(Value::as_str).filter(|s| !s.is_empty()) {
        Some(ticket_type) => Label::Named(ticket_type.to_string()),
        None => Label::unknown_type(),
    }
}

fn raw_id(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    }
}
