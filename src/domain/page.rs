//! Remote page and continuation token types.
//!
//! A [`RemotePage`] is one batch returned by the [`Source`](crate::source::Source)
//! for a given continuation token. A page whose `next_token` is `None` is the
//! last one the source will ever produce.

use super::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque token handed out by the source to resume a listing.
///
/// The engine never interprets the contents; it only stores the token and
/// hands it back to the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One batch of items plus the token for the batch after it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemotePage {
    /// Items in source order.
    pub items: Vec<Item>,

    /// Token for the following page, `None` on the last page.
    pub next_token: Option<ContinuationToken>,
}

impl RemotePage {
    /// Creates a page from items and an optional continuation token.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretgrid::domain::{ContinuationToken, Item, RemotePage};
    ///
    /// let page = RemotePage::new(vec![Item::new("a", "alpha")], Some(ContinuationToken::new("t1")));
    /// assert!(!page.is_last());
    /// assert!(RemotePage::new(vec![], None).is_last());
    /// ```
    #[must_use]
    pub const fn new(items: Vec<Item>, next_token: Option<ContinuationToken>) -> Self {
        Self { items, next_token }
    }

    /// Returns `true` if the source reported no further pages.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.next_token.is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
