//! Remote page cache.
//!
//! [`RemotePageCache`] retains every remote page fetched since the last
//! refresh, in fetch order, together with the index of the page currently
//! shown. Going back never fetches, and going forward onto a page that was
//! already fetched replays it from the cache. The retained sequence doubles as
//! the page history exposed by [`RemotePageCache::history`].
//!
//! The synchronous [`advance`](RemotePageCache::advance) and
//! [`refresh`](RemotePageCache::refresh) take the fetch as a closure. The
//! controller, which fetches on a worker thread, uses the split primitives
//! instead: [`next_step`](RemotePageCache::next_step) to decide,
//! [`push_fetched`](RemotePageCache::push_fetched) and
//! [`install_first`](RemotePageCache::install_first) to apply a result.

use crate::domain::{ContinuationToken, GridError, RemotePage, Result};
use serde::{Deserialize, Serialize};

/// What moving to the next remote page requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// The next page is already cached.
    Cached,

    /// The next page must be fetched with this token.
    Fetch(ContinuationToken),

    /// The source has no further pages, or nothing is loaded yet.
    Exhausted,
}

/// Fetched remote pages and the index of the current one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemotePageCache {
    pages: Vec<RemotePage>,
    current: usize,
}

impl RemotePageCache {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of cached pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Zero-based index of the current page. Meaningless while empty.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The page at the current index, `None` while nothing is loaded.
    #[must_use]
    pub fn current_page(&self) -> Option<&RemotePage> {
        self.pages.get(self.current)
    }

    /// Every retained page in fetch order.
    #[must_use]
    pub fn history(&self) -> &[RemotePage] {
        &self.pages
    }

    /// Returns `true` if a next page is cached or can be fetched.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.pages.len()
            || self
                .current_page()
                .is_some_and(|page| page.next_token.is_some())
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current > 0
    }

    /// Decides how the next page would be reached.
    #[must_use]
    pub fn next_step(&self) -> NextStep {
        if self.current + 1 < self.pages.len() {
            return NextStep::Cached;
        }
        match self.current_page().and_then(|page| page.next_token.clone()) {
            Some(token) => NextStep::Fetch(token),
            None => NextStep::Exhausted,
        }
    }

    /// Moves onto the already cached next page.
    ///
    /// Returns `None` without moving if the next page is not cached.
    pub fn step_forward(&mut self) -> Option<&RemotePage> {
        if self.current + 1 < self.pages.len() {
            self.current += 1;
            self.pages.get(self.current)
        } else {
            None
        }
    }

    /// Appends a freshly fetched page without moving the current index.
    pub fn push_fetched(&mut self, page: RemotePage) {
        tracing::debug!(
            index = self.pages.len(),
            items = page.len(),
            has_next = page.next_token.is_some(),
            "remote page cached"
        );
        self.pages.push(page);
    }

    /// Replaces the cache with a single freshly fetched first page.
    pub fn install_first(&mut self, page: RemotePage) {
        self.clear();
        self.push_fetched(page);
    }

    /// Discards every cached page and resets the index.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.current = 0;
    }

    /// Moves to the next remote page, fetching it only if it is not cached.
    ///
    /// `fetch` is called with the current page's continuation token, and only
    /// when no cached next page exists. On failure the cache is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Exhausted`] if there is no next page, or whatever
    /// error `fetch` returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretgrid::domain::{ContinuationToken, Item, RemotePage};
    /// use secretgrid::paging::RemotePageCache;
    ///
    /// let mut cache = RemotePageCache::new();
    /// cache.install_first(RemotePage::new(vec![Item::new("1", "a")], Some(ContinuationToken::new("t"))));
    ///
    /// let page = cache.advance(|token| {
    ///     assert_eq!(token.as_str(), "t");
    ///     Ok(RemotePage::new(vec![Item::new("2", "b")], None))
    /// })?;
    /// assert_eq!(page.items[0].name, "b");
    /// assert_eq!(cache.current_index(), 1);
    /// # Ok::<(), secretgrid::domain::GridError>(())
    /// ```
    pub fn advance<F>(&mut self, fetch: F) -> Result<&RemotePage>
    where
        F: FnOnce(&ContinuationToken) -> Result<RemotePage>,
    {
        match self.next_step() {
            NextStep::Cached => {
                tracing::debug!(index = self.current + 1, "advance served from cache");
                self.current += 1;
            }
            NextStep::Fetch(token) => {
                let page = fetch(&token)?;
                self.push_fetched(page);
                self.current += 1;
            }
            NextStep::Exhausted => return Err(GridError::Exhausted),
        }
        self.pages.get(self.current).ok_or(GridError::Exhausted)
    }

    /// Moves to the previous cached page. Stays on page 0 if already there.
    ///
    /// Returns `None` only while the cache is empty.
    pub fn retreat(&mut self) -> Option<&RemotePage> {
        self.current = self.current.saturating_sub(1);
        self.pages.get(self.current)
    }

    /// Discards all cached pages and fetches page 0 again.
    ///
    /// `fetch` is called with no token. On failure the cache stays empty.
    ///
    /// # Errors
    ///
    /// Returns whatever error `fetch` returns.
    pub fn refresh<F>(&mut self, fetch: F) -> Result<&RemotePage>
    where
        F: FnOnce(Option<&ContinuationToken>) -> Result<RemotePage>,
    {
        self.clear();
        let page = fetch(None)?;
        self.push_fetched(page);
        self.pages.first().ok_or(GridError::Exhausted)
    }
}
