//! Source collaborator abstraction.
//!
//! This module defines the [`Source`] trait the fetch worker talks to. A source
//! is the remote data provider: it lists items one page at a time and looks up
//! a single item's detail value on demand.
//!
//! # Design Philosophy
//!
//! The trait only carries the two calls the engine makes. Credential
//! resolution, retries and transport belong to the implementation; the engine
//! passes the [`CredentialContext`] through without reading it.

use crate::domain::{ContinuationToken, CredentialContext, RemotePage, Result};

/// Remote data provider.
///
/// # Implementations
///
/// - [`FixtureSource`](super::FixtureSource): Serves items from memory or a JSON file
///
/// # Examples
///
/// ```
/// use secretgrid::domain::{CredentialContext, Item};
/// use secretgrid::source::{FixtureSource, Source};
///
/// let mut source = FixtureSource::new(vec![Item::new("1", "alpha"), Item::new("2", "beta")]);
/// let page = source.list_page(&CredentialContext::default(), None, 1)?;
/// assert_eq!(page.items.len(), 1);
/// assert!(page.next_token.is_some());
/// # Ok::<(), secretgrid::domain::GridError>(())
/// ```
pub trait Source: Send {
    /// Lists one page of items.
    ///
    /// `token` is `None` for the first page and otherwise a token this source
    /// returned earlier. `page_size` is a hint; sources may return fewer items.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Fetch`](crate::domain::GridError::Fetch) if the
    /// listing fails for any reason.
    fn list_page(
        &mut self,
        context: &CredentialContext,
        token: Option<&ContinuationToken>,
        page_size: usize,
    ) -> Result<RemotePage>;

    /// Returns the detail value of one item.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Source`](crate::domain::GridError::Source) if the
    /// item is unknown or the lookup fails.
    fn item_detail(&mut self, context: &CredentialContext, id: &str) -> Result<String>;
}
