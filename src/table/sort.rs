//! Sort engine: single-column stable sort and the sort toggle state machine.

use crate::model::{Record, compare_values};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of the active sort.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }

    /// Apply this direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// The column currently ordering the view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct SortState {
    pub key: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Next sort state after the sort control of column `key` is activated.
///
/// A new column starts ascending; the same column flips direction. There is
/// no way back to "unsorted" through this transition.
#[must_use]
pub fn toggle_sort(current: Option<&SortState>, key: &str) -> SortState {
    match current {
        Some(state) if state.key == key => SortState {
            key: state.key.clone(),
            direction: state.direction.flipped(),
        },
        _ => SortState::asc(key),
    }
}

/// Reorder `indices` (into `rows`) by the sort state, stably.
pub fn sort_indices<R: Record>(rows: &[R], indices: &[usize], sort: Option<&SortState>) -> Vec<usize> {
    let Some(sort) = sort else {
        return indices.to_vec();
    };
    let key = sort.key.as_str();
    let direction = sort.direction;
    merge_sort_by(indices, &mut |a: &usize, b: &usize| {
        direction.apply(compare_values(rows[*a].field(key), rows[*b].field(key)))
    })
}

/// The rows ordered by the sort state. Rows comparing equal keep their
/// relative input order in both directions.
pub fn apply_sort<'a, R: Record>(rows: &'a [R], sort: Option<&SortState>) -> Vec<&'a R> {
    let all: Vec<usize> = (0..rows.len()).collect();
    sort_indices(rows, &all, sort)
        .into_iter()
        .map(|idx| &rows[idx])
        .collect()
}

/// Stable top-down merge sort.
///
/// Incomparable values make the comparator non-transitive, so this must not
/// assume a total order: it never panics and only moves an element ahead of
/// an earlier one when the comparator says it is strictly less.
fn merge_sort_by<T, F>(items: &[T], cmp: &mut F) -> Vec<T>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items.to_vec();
    }
    let mid = items.len() / 2;
    let left = merge_sort_by(&items[..mid], cmp);
    let right = merge_sort_by(&items[mid..], cmp);

    let mut merged = Vec::with_capacity(items.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if cmp(&right[j], &left[i]) == Ordering::Less {
            merged.push(right[j]);
            j += 1;
        } else {
            merged.push(left[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}
