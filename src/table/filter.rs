//! Filter engine: per-column, case-insensitive substring constraints.
//!
//! Every column key with non-empty filter text is an independent predicate;
//! a row is kept only if it satisfies all of them. Filtering selects a
//! subset and never reorders.

use crate::model::{Record, filter_text};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Filter text per column key.
///
/// Empty text means "no constraint" for that column. Whitespace is a literal
/// constraint and is never trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FilterState {
    entries: IndexMap<String, String>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter text for exactly one column; other entries are untouched.
    pub fn set(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Filter text for a column, empty when unset.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map_or("", String::as_str)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries that actually constrain rows.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(key, text)| (key.as_str(), text.as_str()))
    }

    /// Whether no entry constrains rows.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.active().next().is_none()
    }

    /// All entries, including empty ones, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Active predicates with their text lower-cased once up front.
struct Needles(Vec<(String, String)>);

impl Needles {
    fn from_state(filters: &FilterState) -> Self {
        Self(
            filters
                .active()
                .map(|(key, text)| (key.to_string(), text.to_lowercase()))
                .collect(),
        )
    }

    fn matches<R: Record>(&self, row: &R) -> bool {
        self.0.iter().all(|(key, needle)| {
            filter_text(row.field(key))
                .to_lowercase()
                .contains(needle.as_str())
        })
    }
}

/// Whether a single row satisfies every active filter.
pub fn row_matches<R: Record>(row: &R, filters: &FilterState) -> bool {
    Needles::from_state(filters).matches(row)
}

/// Indices into `rows` of the rows that pass, in input order.
pub fn filter_indices<R: Record>(rows: &[R], filters: &FilterState) -> Vec<usize> {
    let needles = Needles::from_state(filters);
    if needles.0.is_empty() {
        return (0..rows.len()).collect();
    }
    rows.iter()
        .enumerate()
        .filter(|(_, row)| needles.matches(*row))
        .map(|(idx, _)| idx)
        .collect()
}

/// The rows that pass every active filter, in input order.
pub fn apply_filters<'a, R: Record>(rows: &'a [R], filters: &FilterState) -> Vec<&'a R> {
    filter_indices(rows, filters)
        .into_iter()
        .map(|idx| &rows[idx])
        .collect()
}
