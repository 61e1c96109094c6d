//! In-memory and JSON file-backed source.
//!
//! [`FixtureSource`] serves a fixed item list page by page. Continuation tokens
//! have the form `offset:N`, where `N` is the index of the first item of the
//! next page. The source is used for offline browsing and drives the
//! integration tests.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "items": [
//!     { "id": "arn:...:prod/db", "name": "prod/db", "last_changed": 1709632800 }
//!   ],
//!   "details": {
//!     "arn:...:prod/db": "{\"password\":\"...\"}"
//!   }
//! }
//! ```

use super::backend::Source;
use crate::domain::{ContinuationToken, CredentialContext, GridError, Item, RemotePage, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const TOKEN_PREFIX: &str = "offset:";

/// On-disk fixture container.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FixtureData {
    /// Version of the fixture format.
    version: u32,

    #[serde(default)]
    items: Vec<Item>,

    /// Detail values keyed by item id.
    #[serde(default)]
    details: HashMap<String, String>,
}

/// Source serving a fixed item list.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    items: Vec<Item>,
    details: HashMap<String, String>,
}

impl FixtureSource {
    /// Creates a source over `items` with no detail values.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            details: HashMap::new(),
        }
    }

    /// Adds detail values keyed by item id.
    #[must_use]
    pub fn with_details(mut self, details: HashMap<String, String>) -> Self {
        self.details = details;
        self
    }

    /// Loads a fixture from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use secretgrid::source::FixtureSource;
    ///
    /// let source = FixtureSource::from_file("/tmp/secrets.json")?;
    /// # Ok::<(), secretgrid::domain::GridError>(())
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading fixture source");

        let contents = std::fs::read_to_string(path)?;
        let data: FixtureData = serde_json::from_str(&contents)
            .map_err(|e| GridError::Source(format!("failed to parse fixture JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            items = data.items.len(),
            details = data.details.len(),
            "fixture source loaded"
        );

        Ok(Self {
            items: data.items,
            details: data.details,
        })
    }

    fn parse_offset(token: &ContinuationToken) -> Result<usize> {
        token
            .as_str()
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|offset| offset.parse().ok())
            .ok_or_else(|| GridError::Fetch(format!("invalid continuation token: {token}")))
    }
}

impl Source for FixtureSource {
    fn list_page(
        &mut self,
        context: &CredentialContext,
        token: Option<&ContinuationToken>,
        page_size: usize,
    ) -> Result<RemotePage> {
        let start = token.map(Self::parse_offset).transpose()?.unwrap_or(0);
        if start > self.items.len() {
            return Err(GridError::Fetch(format!(
                "continuation offset {start} past end of {} items",
                self.items.len()
            )));
        }

        let end = start.saturating_add(page_size.max(1)).min(self.items.len());
        let next_token =
            (end < self.items.len()).then(|| ContinuationToken::new(format!("{TOKEN_PREFIX}{end}")));

        tracing::debug!(%context, start, end, has_next = next_token.is_some(), "fixture page listed");

        Ok(RemotePage::new(self.items[start..end].to_vec(), next_token))
    }

    fn item_detail(&mut self, context: &CredentialContext, id: &str) -> Result<String> {
        tracing::debug!(%context, id, "fixture detail lookup");
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| GridError::Source(format!("no detail for item {id}")))
    }
}
