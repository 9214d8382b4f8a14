//! Keyset pagination for every list screen.
//!
//! [`PaginatedList`] tracks `next_cursor` and `has_more` for one list,
//! appends pages deduplicated by a key, and resets on refresh or filter
//! change. Fetching is split into `begin_*` (decide whether to fetch and
//! with which cursor) and [`PaginatedList::complete`] (merge the result), so
//! a caller can mark a fetch in flight before awaiting it. [`refresh`] and
//! [`load_more`] wrap both halves around a [`PageSource`].
//!
//! [`refresh`]: PaginatedList::refresh
//! [`load_more`]: PaginatedList::load_more

use async_trait::async_trait;
use std::collections::HashSet;
use std::hash::Hash;

use crate::error::{ApiError, ApiResult};
use crate::models::{Page, PageRequest};

/// Anything that can fetch one page of `T`.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> ApiResult<Page<T>>;
}

/// Why a fetch was not issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another fetch for this list has not completed yet.
    InFlight,
    /// The last page said there is nothing more.
    Exhausted,
    /// A page was fetched but came back without a cursor.
    NoCursor,
    /// Nothing has been fetched yet; use a refresh instead.
    NotStarted,
}

/// Result of a `load_more`/`refresh` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was merged; `added` new unique items.
    Loaded { added: usize },
    /// No request was made.
    Skipped(SkipReason),
}

/// A fetch that has been started and must be passed back to
/// [`PaginatedList::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub request: PageRequest,
    reset: bool,
    generation: u64,
}

/// One paginated list with its cursor state.
pub struct PaginatedList<T, K> {
    items: Vec<T>,
    keys: HashSet<K>,
    key_fn: fn(&T) -> K,
    page_size: u32,
    next_cursor: Option<String>,
    has_more: bool,
    started: bool,
    loading: bool,
    generation: u64,
    error: Option<ApiError>,
}

impl<T, K> std::fmt::Debug for PaginatedList<T, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedList")
            .field("items", &self.items.len())
            .field("next_cursor", &self.next_cursor)
            .field("has_more", &self.has_more)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}

impl<T, K> PaginatedList<T, K>
where
    K: Eq + Hash,
{
    /// An empty list that has not fetched anything yet.
    pub fn new(page_size: u32, key_fn: fn(&T) -> K) -> Self {
        Self {
            items: Vec::new(),
            keys: HashSet::new(),
            key_fn,
            page_size: page_size.max(1),
            next_cursor: None,
            has_more: true,
            started: false,
            loading: false,
            generation: 0,
            error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Mutable access for optimistic patches on individual rows.
    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The error from the last fetch, if it failed.
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Find an item by key.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut T> {
        let key_fn = self.key_fn;
        self.items.iter_mut().find(|item| &key_fn(item) == key)
    }

    /// Remove an item by key, returning it with its former position.
    pub fn remove(&mut self, key: &K) -> Option<(usize, T)> {
        let key_fn = self.key_fn;
        let index = self.items.iter().position(|item| &key_fn(item) == key)?;
        self.keys.remove(key);
        Some((index, self.items.remove(index)))
    }

    /// Put an item back at `index` (clamped), e.g. after a failed delete.
    /// Ignored if the key is already present.
    pub fn insert_at(&mut self, index: usize, item: T) {
        let key = (self.key_fn)(&item);
        if self.keys.insert(key) {
            let index = index.min(self.items.len());
            self.items.insert(index, item);
        }
    }

    /// Drop items and cursor state, e.g. on filter change. Any fetch still
    /// in flight will be ignored when it completes.
    pub fn reset(&mut self) {
        self.items.clear();
        self.keys.clear();
        self.next_cursor = None;
        self.has_more = true;
        self.started = false;
        self.loading = false;
        self.error = None;
        self.generation += 1;
    }

    /// Start a refresh from the first page.
    ///
    /// Existing items and cursor state stay in place until the first page
    /// arrives, so a failed refresh leaves the list able to load more. A
    /// refresh supersedes any fetch in flight.
    pub fn begin_refresh(&mut self) -> PendingFetch {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        PendingFetch {
            request: PageRequest::first(self.page_size),
            reset: true,
            generation: self.generation,
        }
    }

    /// Start loading the next page, unless a fetch should be suppressed.
    pub fn begin_load_more(&mut self) -> Result<PendingFetch, SkipReason> {
        if self.loading {
            return Err(SkipReason::InFlight);
        }
        if !self.started {
            return Err(SkipReason::NotStarted);
        }
        if !self.has_more {
            return Err(SkipReason::Exhausted);
        }
        let Some(cursor) = self.next_cursor.clone() else {
            return Err(SkipReason::NoCursor);
        };

        self.loading = true;
        self.error = None;
        Ok(PendingFetch {
            request: PageRequest {
                limit: self.page_size,
                after: Some(cursor),
            },
            reset: false,
            generation: self.generation,
        })
    }

    /// Merge the result of a fetch started with `begin_*`.
    ///
    /// Returns the number of new unique items, or the fetch error. Results
    /// of superseded fetches are dropped and reported as 0 added.
    pub fn complete(&mut self, pending: PendingFetch, result: ApiResult<Page<T>>) -> ApiResult<usize> {
        if pending.generation != self.generation {
            tracing::debug!("Dropping superseded page result");
            return Ok(0);
        }
        self.loading = false;

        match result {
            Ok(page) => {
                if pending.reset {
                    self.items.clear();
                    self.keys.clear();
                }
                self.started = true;
                if page.has_more && page.next_cursor.is_none() {
                    tracing::warn!("Page reports more items but no cursor");
                }
                self.has_more = page.has_more;
                self.next_cursor = page.next_cursor;
                let added = self.append_unique(page.data);
                tracing::debug!(
                    "Page loaded: {} new, {} total, has_more={}",
                    added,
                    self.items.len(),
                    self.has_more
                );
                Ok(added)
            }
            Err(e) if e.is_cursor_invalidated() => {
                tracing::warn!("Cursor invalidated, discarding list: {}", e);
                self.reset();
                self.error = Some(e.clone());
                Err(e)
            }
            Err(e) => {
                tracing::warn!("Page fetch failed: {}", e);
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Refresh from the first page.
    pub async fn refresh<S>(&mut self, source: &S) -> ApiResult<LoadOutcome>
    where
        S: PageSource<T> + ?Sized,
    {
        let pending = self.begin_refresh();
        let result = source.fetch_page(pending.request.clone()).await;
        let added = self.complete(pending, result)?;
        Ok(LoadOutcome::Loaded { added })
    }

    /// Load the next page, or report why no request was made.
    pub async fn load_more<S>(&mut self, source: &S) -> ApiResult<LoadOutcome>
    where
        S: PageSource<T> + ?Sized,
    {
        let pending = match self.begin_load_more() {
            Ok(p) => p,
            Err(reason) => {
                tracing::debug!("Load more skipped: {:?}", reason);
                return Ok(LoadOutcome::Skipped(reason));
            }
        };
        let result = source.fetch_page(pending.request.clone()).await;
        let added = self.complete(pending, result)?;
        Ok(LoadOutcome::Loaded { added })
    }

    fn append_unique(&mut self, incoming: Vec<T>) -> usize {
        let before = self.items.len();
        for item in incoming {
            if self.keys.insert((self.key_fn)(&item)) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }
}

/// Append `incoming` to `existing`, skipping keys already present. Order is
/// by first occurrence.
pub fn merge_unique<T, K, F>(existing: &mut Vec<T>, incoming: Vec<T>, key: F) -> usize
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen: HashSet<K> = existing.iter().map(&key).collect();
    let before = existing.len();
    for item in incoming {
        if seen.insert(key(&item)) {
            existing.push(item);
        }
    }
    existing.len() - before
}
