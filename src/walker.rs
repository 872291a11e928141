// Bulk fetch walker - sequential page walks with a hard record cap
use crate::client::{CollectionQuery, PageSource};
use crate::constants;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// How many records a walk may accumulate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkLimit {
    /// Stop after exactly this many records
    Capped(usize),
    /// Drain every page
    Unbounded,
}

impl WalkLimit {
    /// Validated cap: below 1 is rejected, above the ceiling is clamped
    pub fn capped(max_results: usize) -> Result<Self> {
        if max_results < 1 {
            return Err(Error::validation("max_results must be at least 1"));
        }
        Ok(WalkLimit::Capped(max_results.min(constants::MAX_RESULTS_CEILING)))
    }

    fn cap(&self) -> Option<usize> {
        match self {
            WalkLimit::Capped(n) => Some(*n),
            WalkLimit::Unbounded => None,
        }
    }
}

/// Everything one walk needs
#[derive(Debug, Clone)]
pub struct WalkRequest {
    pub query: CollectionQuery,
    /// Requested page size for list endpoints; a shorter page with no `next`
    /// cursor ends the walk
    pub per_page: usize,
    pub limit: WalkLimit,
    /// Optional projection applied to each record before accumulation
    pub fields: Option<Vec<String>>,
}

impl WalkRequest {
    pub fn new(query: CollectionQuery, per_page: usize, limit: WalkLimit) -> Self {
        Self {
            query,
            per_page,
            limit,
            fields: None,
        }
    }

    /// Walk every page of the collection
    pub fn drain(query: CollectionQuery, per_page: usize) -> Self {
        Self::new(query, per_page, WalkLimit::Unbounded)
    }

    pub fn fields(mut self, fields: Option<Vec<String>>) -> Self {
        self.fields = fields.filter(|f| !f.is_empty());
        self
    }
}

/// Outcome of one walk
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionResult {
    pub records: Vec<Value>,
    pub total_fetched: usize,
    pub pages_fetched: u32,
    /// True iff the walk stopped at the cap rather than at the end of the data
    pub truncated: bool,
}

/// Walk a collection page by page starting at page 1.
///
/// After each page: an empty page ends the walk; reaching the cap truncates to the
/// cap and ends it; a short page with no `next` cursor ends it; otherwise the walk
/// moves to the cursor's `next` page, or the following page when no cursor is sent.
/// Any failed page fails the whole walk and drops what was gathered.
pub async fn collect<S: PageSource>(source: &S, request: &WalkRequest) -> Result<CollectionResult> {
    let per_page = request.query.page_size(request.per_page).max(1);
    let cap = request.limit.cap();

    let mut records: Vec<Value> = Vec::new();
    let mut page: u32 = 1;
    let mut pages_fetched: u32 = 0;
    let mut truncated = false;

    loop {
        let fetched = source.fetch_page(&request.query, page, per_page).await?;
        pages_fetched += 1;

        let page_len = fetched.records.len();
        if page_len == 0 {
            break;
        }

        match &request.fields {
            Some(fields) => records.extend(fetched.records.into_iter().map(|r| project(r, fields))),
            None => records.extend(fetched.records),
        }

        let last_page = page_len < per_page && fetched.cursor.next.is_none();

        if let Some(cap) = cap
            && records.len() >= cap
        {
            // landing exactly on the cap with the final page is not a truncation
            truncated = !(records.len() == cap && last_page);
            records.truncate(cap);
            if truncated {
                log::info!(
                    "Walk of {} stopped at cap {} after {} pages",
                    request.query.collection.name(),
                    cap,
                    pages_fetched
                );
            }
            break;
        }

        if last_page {
            break;
        }

        page = match fetched.cursor.next {
            Some(next) if next > page => next,
            _ => page + 1,
        };
    }

    log::debug!(
        "Collected {} {} over {} pages",
        records.len(),
        request.query.collection.name(),
        pages_fetched
    );

    Ok(CollectionResult {
        total_fetched: records.len(),
        records,
        pages_fetched,
        truncated,
    })
}

/// Keep only the listed keys that exist in the record
fn project(record: Value, fields: &[String]) -> Value {
    match record {
        Value::Object(mut map) => {
            let mut kept = Map::new();
            for field in fields {
                if let Some(value) = map.remove(field) {
                    kept.insert(field.clone(), value);
                }
            }
            Value::Object(kept)
        }
        other => other,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::client::{Collection, CollectionQuery, PageSource, RecordPage};
    use crate::cursor::PageCursor;
    use crate::error::{Error, Result};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory collections served as pre-split pages, keyed by collection and an
    /// optional filter fragment
    #[derive(Default)]
    pub struct MemorySource {
        pages: HashMap<(Collection, Option<String>), Vec<Vec<Value>>>,
        with_cursor: bool,
        fail_on: Option<(Collection, u32)>,
        pub calls: Mutex<Vec<(Collection, Option<String>, u32)>>,
    }

    impl MemorySource {
        pub fn new() -> Self {
            Self::default()
        }

        /// Advertise `next` on every page except the last
        pub fn with_cursor(mut self) -> Self {
            self.with_cursor = true;
            self
        }

        pub fn pages(mut self, collection: Collection, filter: Option<&str>, pages: Vec<Vec<Value>>) -> Self {
            self.pages.insert((collection, filter.map(String::from)), pages);
            self
        }

        pub fn fail_on(mut self, collection: Collection, page: u32) -> Self {
            self.fail_on = Some((collection, page));
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn calls_for(&self, collection: Collection) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(c, _, _)| *c == collection)
                .count()
        }
    }

    impl PageSource for MemorySource {
        async fn fetch_page(
            &self,
            query: &CollectionQuery,
            page: u32,
            _per_page: usize,
        ) -> Result<RecordPage> {
            self.calls
                .lock()
                .unwrap()
                .push((query.collection, query.filter.clone(), page));

            if self.fail_on == Some((query.collection, page)) {
                return Err(Error::Status {
                    context: format!("Failed to fetch {}", query.collection.name()),
                    status: 500,
                    details: None,
                });
            }

            // most specific registered fragment contained in the filter wins
            let pages = self
                .pages
                .iter()
                .filter(|((collection, fragment), _)| {
                    *collection == query.collection
                        && match (fragment, &query.filter) {
                            (None, _) => true,
                            (Some(fragment), Some(filter)) => filter.contains(fragment.as_str()),
                            (Some(_), None) => false,
                        }
                })
                .max_by_key(|((_, fragment), _)| fragment.as_ref().map_or(0, |f| f.len()))
                .map(|(_, pages)| pages.clone())
                .unwrap_or_default();
            let index = page as usize - 1;
            let records = pages.get(index).cloned().unwrap_or_default();
            let cursor = if self.with_cursor && index + 1 < pages.len() {
                PageCursor {
                    next: Some(page + 1),
                    prev: None,
                }
            } else {
                PageCursor::default()
            };

            Ok(RecordPage { records, cursor })
        }
    }

    /// Split `count` generated records into pages of the given sizes
    pub fn numbered_pages(sizes: &[usize]) -> Vec<Vec<Value>> {
        let mut id = 0u64;
        sizes
            .iter()
            .map(|&size| {
                (0..size)
                    .map(|_| {
                        id += 1;
                        serde_json::json!({ "id": id, "subject": format!("Ticket {}", id) })
                    })
                    .collect()
            })
            .collect()
    }
}
