// Freshservice client - HTTP page fetches for ticket, agent, and group collections
use crate::config::ClientConfig;
use crate::constants;
use crate::cursor::{self, PageCursor};
use crate::error::{Error, ErrorDetails, Result};
use serde_json::Value;
use std::future::Future;
use std::time::Instant;

/// Paginated collections the engine walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Tickets,
    Agents,
    Groups,
}

impl Collection {
    /// Path segment and envelope key (`{"tickets": [...]}`)
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Tickets => "tickets",
            Collection::Agents => "agents",
            Collection::Groups => "groups",
        }
    }
}

/// One collection plus the filter applied to every page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    pub collection: Collection,
    /// Filter expression in the platform's query language, unquoted
    pub filter: Option<String>,
    pub workspace_id: Option<u64>,
}

impl CollectionQuery {
    pub fn agents() -> Self {
        Self {
            collection: Collection::Agents,
            filter: None,
            workspace_id: None,
        }
    }

    pub fn groups() -> Self {
        Self {
            collection: Collection::Groups,
            filter: None,
            workspace_id: None,
        }
    }

    pub fn tickets(filter: impl Into<String>) -> Self {
        Self {
            collection: Collection::Tickets,
            filter: Some(filter.into()),
            workspace_id: None,
        }
    }

    pub fn workspace(mut self, workspace_id: Option<u64>) -> Self {
        self.workspace_id = workspace_id;
        self
    }

    /// Page size the endpoint actually serves. List endpoints honor the requested
    /// size; filtered ticket queries always come back in pages of 30.
    pub fn page_size(&self, requested: usize) -> usize {
        match (&self.collection, &self.filter) {
            (Collection::Tickets, Some(_)) => constants::FILTER_PAGE_SIZE,
            _ => requested,
        }
    }
}

/// Records of one page and the cursor advertised with them
#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    pub records: Vec<Value>,
    pub cursor: PageCursor,
}

/// Anything that can serve one page of a collection.
///
/// The walker and the analytics engine only talk to this trait, so they run the
/// same way against the HTTP client and against in-memory collections.
pub trait PageSource: Send + Sync {
    fn fetch_page(
        &self,
        query: &CollectionQuery,
        page: u32,
        per_page: usize,
    ) -> impl Future<Output = Result<RecordPage>> + Send;
}

/// Attaches the API-key credential to every request
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: String,
}

impl ApiKeyAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Basic auth with the key as user name and `X` as password
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth(&self.api_key, Some("X"))
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth").field("api_key", &"<redacted>").finish()
    }
}

/// HTTP client for the Freshservice v2 API
pub struct FreshserviceClient {
    client: reqwest::Client,
    base_url: String,
    auth: ApiKeyAuth,
}

impl FreshserviceClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(constants::user_agent())
            .build()
            .map_err(|e| Error::Transport {
                context: "Failed to build HTTP client".into(),
                source: e,
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            auth: ApiKeyAuth::new(config.api_key.clone()),
        })
    }

    /// URL of one page. Filter expressions are wrapped in literal double quotes before
    /// encoding; the platform answers unquoted filters with a server error.
    pub fn page_url(&self, query: &CollectionQuery, page: u32, per_page: usize) -> String {
        let mut url = match (&query.collection, &query.filter) {
            (Collection::Tickets, Some(filter)) => format!(
                "{}/tickets/filter?query={}&page={}",
                self.base_url,
                urlencoding::encode(&format!("\"{}\"", filter)),
                page
            ),
            (collection, _) => format!(
                "{}/{}?page={}&per_page={}",
                self.base_url,
                collection.name(),
                page,
                per_page
            ),
        };

        if let Some(workspace_id) = query.workspace_id {
            url.push_str(&format!("&workspace_id={}", workspace_id));
        }
        url
    }

    async fn do_fetch_page(
        &self,
        query: &CollectionQuery,
        page: u32,
        per_page: usize,
    ) -> Result<RecordPage> {
        let collection = query.collection.name();
        let context = format!("Failed to fetch {}", collection);
        let url = self.page_url(query, page, per_page);

        log::debug!("Fetching {} page {}: {}", collection, page, url);
        let request_start = Instant::now();

        let response = self
            .auth
            .apply(self.client.get(&url))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::Transport {
                context: context.clone(),
                source: e,
            })?;

        let status = response.status();
        log::debug!(
            "HTTP request completed in {:?}, status: {}",
            request_start.elapsed(),
            status
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("{} page {} failed with status {}", collection, page, status);
            return Err(Error::Status {
                context,
                status: status.as_u16(),
                details: ErrorDetails::from_body(body),
            });
        }

        let cursor = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(cursor::parse_link_header)
            .unwrap_or_default();

        let body = response.text().await.map_err(|e| Error::Transport {
            context: context.clone(),
            source: e,
        })?;
        let data: Value = serde_json::from_str(&body).map_err(|e| Error::Decode {
            context: context.clone(),
            message: e.to_string(),
        })?;

        let records = match data.get(collection) {
            Some(Value::Array(items)) => items.clone(),
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                return Err(Error::Decode {
                    context,
                    message: format!("\"{}\" is not an array", collection),
                });
            }
        };

        Ok(RecordPage { records, cursor })
    }
}

impl PageSource for FreshserviceClient {
    async fn fetch_page(
        &self,
        query: &CollectionQuery,
        page: u32,
        per_page: usize,
    ) -> Result<RecordPage> {
        self.do_fetch_page(query, page, per_page).await
    }
}
