// Directory cache - TTL-bounded agent and group lookup tables
use crate::analytics::labels::Label;
use crate::client::{CollectionQuery, PageSource};
use crate::constants;
use crate::error::Result;
use crate::walker::{self, WalkRequest};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentEntry {
    pub name: String,
    pub email: Option<String>,
}

/// Agent and group directories as of one refresh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupDirectory {
    pub agents: BTreeMap<u64, AgentEntry>,
    pub groups: BTreeMap<u64, Label>,
    pub fetched_at: DateTime<Utc>,
}

impl LookupDirectory {
    pub fn empty() -> Self {
        Self {
            agents: BTreeMap::new(),
            groups: BTreeMap::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Build the directory from raw agent and group records. Records without a
    /// numeric id are skipped.
    pub fn from_records(agents: &[Value], groups: &[Value]) -> Self {
        let agents = agents
            .iter()
            .filter_map(|agent| {
                let id = agent.get("id").and_then(Value::as_u64)?;
                Some((id, agent_entry(agent)))
            })
            .collect();

        let groups = groups
            .iter()
            .filter_map(|group| {
                let id = group.get("id").and_then(Value::as_u64)?;
                let label = match group.get("name").and_then(Value::as_str) {
                    Some(name) if !name.is_empty() => Label::Named(name.to_string()),
                    _ => Label::group_fallback(id),
                };
                Some((id, label))
            })
            .collect();

        Self {
            agents,
            groups,
            fetched_at: Utc::now(),
        }
    }

    /// Directory name, or `Agent-<id>` for agents missing from it
    pub fn agent_label(&self, id: u64) -> Label {
        match self.agents.get(&id) {
            Some(entry) if !entry.name.is_empty() => Label::Named(entry.name.clone()),
            _ => Label::agent_fallback(id),
        }
    }

    pub fn agent_email(&self, id: u64) -> Option<&str> {
        self.agents.get(&id).and_then(|entry| entry.email.as_deref())
    }

    /// Directory name, or `Group-<id>` for groups missing from it
    pub fn group_label(&self, id: u64) -> Label {
        self.groups
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Label::group_fallback(id))
    }
}

fn agent_entry(agent: &Value) -> AgentEntry {
    let text = |key: &str| agent.get(key).and_then(Value::as_str).unwrap_or("");
    let email = Some(text("email")).filter(|e| !e.is_empty()).map(String::from);

    let full_name = format!("{} {}", text("first_name"), text("last_name"));
    let full_name = full_name.trim();
    let name = if full_name.is_empty() {
        email.clone().unwrap_or_default()
    } else {
        full_name.to_string()
    };

    AgentEntry { name, email }
}

/// Directory plus cache metadata for one `get` call
#[derive(Debug, Clone, Serialize)]
pub struct DirectorySnapshot {
    #[serde(flatten)]
    pub directory: Arc<LookupDirectory>,
    pub cache_age_seconds: f64,
    /// Whether this call performed the refresh
    pub refreshed: bool,
    pub ttl_seconds: u64,
}

struct CachedDirectory {
    directory: Arc<LookupDirectory>,
    stored_at: Instant,
}

/// Shared, TTL-bounded cache of the agent and group directories.
///
/// A stored directory younger than the TTL is served as is. Otherwise both
/// collections are drained and the stored value replaced wholesale; a failed drain
/// leaves the previous value untouched. Concurrent refreshes are serialized and a
/// caller that waited on one reuses its result.
pub struct DirectoryCache {
    ttl: Duration,
    per_page: usize,
    state: RwLock<Option<CachedDirectory>>,
    refresh_lock: Mutex<()>,
}

impl Default for DirectoryCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(constants::DIRECTORY_TTL_SECS))
    }
}

impl DirectoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            per_page: constants::DEFAULT_PAGE_SIZE,
            state: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Page size used when draining the agent and group collections
    pub fn with_page_size(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get<S: PageSource>(&self, source: &S) -> Result<DirectorySnapshot> {
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;
        if let Some(snapshot) = self.fresh().await {
            log::debug!("Directory refreshed by a concurrent caller");
            return Ok(snapshot);
        }

        let agents = WalkRequest::drain(CollectionQuery::agents(), self.per_page);
        let groups = WalkRequest::drain(CollectionQuery::groups(), self.per_page);
        let (agents, groups) = futures_util::future::try_join(
            walker::collect(source, &agents),
            walker::collect(source, &groups),
        )
        .await?;

        let directory = Arc::new(LookupDirectory::from_records(&agents.records, &groups.records));
        log::info!(
            "Refreshed directory: {} agents, {} groups",
            directory.agents.len(),
            directory.groups.len()
        );

        *self.state.write().await = Some(CachedDirectory {
            directory: Arc::clone(&directory),
            stored_at: Instant::now(),
        });

        Ok(DirectorySnapshot {
            directory,
            cache_age_seconds: 0.0,
            refreshed: true,
            ttl_seconds: self.ttl.as_secs(),
        })
    }

    async fn fresh(&self) -> Option<DirectorySnapshot> {
        let state = self.state.read().await;
        let cached = state.as_ref()?;
        let age = cached.stored_at.elapsed();
        if age >= self.ttl {
            return None;
        }
        Some(DirectorySnapshot {
            directory: Arc::clone(&cached.directory),
            cache_age_seconds: age.as_secs_f64(),
            refreshed: false,
            ttl_seconds: self.ttl.as_secs(),
        })
    }
}
