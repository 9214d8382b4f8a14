//! Keyset-paginated list envelopes.

use serde::{Deserialize, Serialize};

/// One page of a list endpoint: `{ data, nextCursor, hasMore }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> Page<T> {
    /// A final page.
    pub fn last(data: Vec<T>) -> Self {
        Self {
            data,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A page with more to come after `cursor`.
    pub fn more(data: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            data,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }

    /// Transform every item.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        }
    }
}

/// Parameters of one page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub after: Option<String>,
}

impl PageRequest {
    /// The first page.
    pub fn first(limit: u32) -> Self {
        Self { limit, after: None }
    }

    /// Render as a query string, starting with `?`.
    pub fn to_query(&self) -> String {
        let mut q = format!("?limit={}", self.limit);
        if let Some(after) = &self.after {
            q.push_str("&after=");
            q.push_str(&urlencoding::encode(after));
        }
        q
    }
}
