//! Item domain model.
//!
//! An [`Item`] is one entry of a remote listing (for the secrets backend, one
//! secret). Items are immutable once fetched; the grid only ever clones and
//! re-windows them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date format used for the last-changed label ("Jan 2, 2006").
const LAST_CHANGED_FORMAT: &str = "%b %-d, %Y";

/// One remotely listed entry.
///
/// # Fields
///
/// - `id`: Opaque identity (an ARN for the secrets backend), used for detail lookups
/// - `name`: Display name, the only field the filter looks at
/// - `description`: Optional free-form description
/// - `last_changed`: Unix timestamp of the last modification, if known
/// - `tags`: Key/value tags attached to the item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_changed: Option<i64>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Item {
    /// Creates an item with no metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretgrid::domain::Item;
    ///
    /// let item = Item::new("arn:aws:secretsmanager:eu-west-1:1:secret:db", "prod/db");
    /// assert_eq!(item.name, "prod/db");
    /// assert!(item.last_changed.is_none());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            last_changed: None,
            tags: BTreeMap::new(),
        }
    }

    /// Sets the last-changed timestamp.
    #[must_use]
    pub fn with_last_changed(mut self, timestamp: i64) -> Self {
        self.last_changed = Some(timestamp);
        self
    }

    /// Returns the last-changed date as a short human-readable label.
    ///
    /// Items without a timestamp (or with one out of chrono's range) read
    /// `"Unknown"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretgrid::domain::Item;
    ///
    /// let item = Item::new("id", "name").with_last_changed(1_136_214_245);
    /// assert_eq!(item.last_changed_label(), "Jan 2, 2006");
    /// assert_eq!(Item::new("id", "name").last_changed_label(), "Unknown");
    /// ```
    #[must_use]
    pub fn last_changed_label(&self) -> String {
        self.last_changed
            .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
            .map_or_else(
                || "Unknown".to_string(),
                |date| date.format(LAST_CHANGED_FORMAT).to_string(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_deserializes_with_missing_metadata() {
        let item: Item = serde_json::from_str(r#"{"id": "a", "name": "alpha"}"#).unwrap();
        assert_eq!(item, Item::new("a", "alpha"));
    }

    #[test]
    fn last_changed_label_uses_unpadded_day() {
        // 2024-03-05T10:00:00Z
        let item = Item::new("a", "alpha").with_last_changed(1_709_632_800);
        assert_eq!(item.last_changed_label(), "Mar 5, 2024");
    }
}
