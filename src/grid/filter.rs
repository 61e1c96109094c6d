//! Text filtering of the current page's items.
//!
//! Filtering is a pure function over the *unfiltered* item set of the current
//! remote page. Callers always re-filter from that source set; a filtered
//! result is never fed back in as input. Order is preserved and an empty query
//! returns every item unchanged.
//!
//! Two match modes are supported:
//! - [`MatchMode::Substring`] (default): case-insensitive substring of the name
//! - [`MatchMode::Fuzzy`]: every whitespace-separated token must fuzzy-match
//!   the lowercased name (Skim algorithm)
//!
//! Neither mode has a pattern language, so no query can fail.

use crate::domain::Item;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a query is matched against item names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,

    /// Token-wise fuzzy match.
    Fuzzy,
}

impl MatchMode {
    /// Parses a mode name, accepting `substring` and `fuzzy` in any case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "substring" => Some(Self::Substring),
            "fuzzy" => Some(Self::Fuzzy),
            _ => None,
        }
    }
}

/// Returns the subsequence of `items` whose names match `query`.
///
/// # Examples
///
/// ```
/// use secretgrid::domain::Item;
/// use secretgrid::grid::filter::{apply, MatchMode};
///
/// let items = vec![Item::new("1", "prod/DB"), Item::new("2", "prod/api"), Item::new("3", "dev/db")];
/// let names: Vec<_> = apply(&items, "db", MatchMode::Substring)
///     .into_iter()
///     .map(|item| item.name)
///     .collect();
/// assert_eq!(names, ["prod/DB", "dev/db"]);
/// assert_eq!(apply(&items, "", MatchMode::Substring), items);
/// ```
#[must_use]
pub fn apply(items: &[Item], query: &str, mode: MatchMode) -> Vec<Item> {
    let _span = tracing::debug_span!("apply_filter",
        total_items = items.len(),
        query_len = query.len(),
        mode = ?mode
    )
    .entered();

    if query.is_empty() {
        return items.to_vec();
    }

    let filtered: Vec<Item> = match mode {
        MatchMode::Substring => {
            let needle = query.to_lowercase();
            items
                .iter()
                .filter(|item| item.name.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }
        MatchMode::Fuzzy => {
            let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
            let matcher = SkimMatcherV2::default();
            items
                .iter()
                .filter(|item| {
                    let name_lower = item.name.to_lowercase();
                    tokens
                        .iter()
                        .all(|token| matcher.fuzzy_match(&name_lower, token).is_some())
                })
                .cloned()
                .collect()
        }
    };

    tracing::debug!(filtered_count = filtered.len(), "filter applied");
    filtered
}

/// Computes character ranges of `name` matched by `query`, for highlighting.
///
/// Ranges are `(start, end)` character indices with exclusive end. Substring
/// mode yields the first occurrence only. Names whose lowercase form changes
/// byte length (some non-ASCII scripts) yield no ranges rather than wrong ones.
#[must_use]
pub fn highlight_ranges(name: &str, query: &str, mode: MatchMode) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return vec![];
    }

    match mode {
        MatchMode::Substring => {
            let name_lower = name.to_lowercase();
            let needle = query.to_lowercase();
            if name_lower.len() != name.len() {
                return vec![];
            }
            name_lower.find(&needle).map_or_else(Vec::new, |byte_start| {
                let start = name_lower[..byte_start].chars().count();
                let end = start + needle.chars().count();
                vec![(start, end)]
            })
        }
        MatchMode::Fuzzy => {
            // Tokens match independently, as in `apply`, so their indices are merged.
            let matcher = SkimMatcherV2::default();
            let mut matched = BTreeSet::new();
            for token in query.split_whitespace().map(str::to_lowercase) {
                if let Some((_score, indices)) = matcher.fuzzy_indices(name, &token) {
                    matched.extend(indices);
                }
            }
            coalesce(&matched.into_iter().collect::<Vec<_>>())
        }
    }
}

/// Collapses sorted character indices into contiguous `(start, end)` runs.
fn coalesce(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Item::new(format!("id-{i}"), *name))
            .collect()
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn substring_is_case_insensitive_and_order_preserving() {
        let all = items(&["Zeta-DB", "alpha", "db-primary", "beta"]);
        let filtered = apply(&all, "Db", MatchMode::Substring);
        assert_eq!(names(&filtered), ["Zeta-DB", "db-primary"]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let all = items(&["alpha", "beta"]);
        assert!(apply(&all, "gamma", MatchMode::Substring).is_empty());
    }

    #[test]
    fn empty_query_returns_input_unchanged() {
        let all = items(&["b", "a", "c"]);
        assert_eq!(apply(&all, "", MatchMode::Substring), all);
        assert_eq!(apply(&all, "", MatchMode::Fuzzy), all);
    }

    #[test]
    fn repeated_application_is_stable() {
        let all = items(&["prod/db", "dev/db", "prod/api"]);
        let first = apply(&all, "prod", MatchMode::Substring);
        let second = apply(&all, "prod", MatchMode::Substring);
        assert_eq!(first, second);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let all = items(&["a.b", "axb", "[x]"]);
        assert_eq!(names(&apply(&all, ".", MatchMode::Substring)), ["a.b"]);
        assert_eq!(names(&apply(&all, "[", MatchMode::Substring)), ["[x]"]);
    }

    #[test]
    fn fuzzy_requires_every_token() {
        let all = items(&["prod/database", "prod/api", "dev/database"]);
        let filtered = apply(&all, "prd dbase", MatchMode::Fuzzy);
        assert_eq!(names(&filtered), ["prod/database"]);
    }

    #[test]
    fn substring_highlight_uses_char_indices() {
        assert_eq!(highlight_ranges("prod/DB-main", "db", MatchMode::Substring), [(5, 7)]);
        assert!(highlight_ranges("prod", "x", MatchMode::Substring).is_empty());
    }

    #[test]
    fn fuzzy_highlight_covers_every_token() {
        let ranges = highlight_ranges("prod/database", "prd dbase", MatchMode::Fuzzy);
        assert!(!ranges.is_empty());
        assert_eq!(ranges.first().map(|r| r.0), Some(0));
        let highlighted: usize = ranges.iter().map(|(start, end)| end - start).sum();
        assert!(highlighted >= "dbase".len());
        assert!(ranges.windows(2).all(|w| w[0].1 < w[1].0));
    }

    #[test]
    fn coalesce_merges_consecutive_indices() {
        assert_eq!(coalesce(&[0, 1, 2, 5, 7, 8]), [(0, 3), (5, 6), (7, 9)]);
        assert!(coalesce(&[]).is_empty());
    }

    #[test]
    fn match_mode_parses_names() {
        assert_eq!(MatchMode::from_name("Fuzzy"), Some(MatchMode::Fuzzy));
        assert_eq!(MatchMode::from_name(" substring "), Some(MatchMode::Substring));
        assert_eq!(MatchMode::from_name("regex"), None);
    }
}
