// Cursor parser - decodes pagination Link headers into adjacent page numbers

use regex::Regex;
use std::sync::LazyLock;

static LINK_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="([^"]+)""#).expect("valid link regex"));

// `[?&]` keeps `per_page=` from matching
static PAGE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]page=(\d+)").expect("valid page regex"));

/// Adjacent pages advertised by one response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    pub next: Option<u32>,
    pub prev: Option<u32>,
}

impl PageCursor {
    pub fn is_empty(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }
}

/// Parse a `Link` header such as
/// `<https://x/api/v2/agents?page=2>; rel="next", <https://x/api/v2/agents?page=1>; rel="prev"`.
///
/// Entries that are malformed, carry no `page=` parameter, or name a relation other
/// than `next`/`prev` are skipped. Never fails.
pub fn parse_link_header(header: &str) -> PageCursor {
    let mut cursor = PageCursor::default();

    for entry in header.split(',') {
        let Some(caps) = LINK_ENTRY.captures(entry) else {
            continue;
        };
        let Some(page) = PAGE_PARAM
            .captures(&caps[1])
            .and_then(|m| m[1].parse::<u32>().ok())
        else {
            continue;
        };

        match &caps[2] {
            "next" => cursor.next = Some(page),
            "prev" => cursor.prev = Some(page),
            _ => {}
        }
    }

    cursor
}
