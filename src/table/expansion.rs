//! Per-row expansion flags.
//!
//! Rows are keyed by their position in the displayed sequence unless the
//! table was given a stable id field. Positional keys follow the position,
//! not the row: after a re-sort the flag at position 0 belongs to whatever
//! row now sits there.

use std::collections::HashMap;

/// Identity of a row for expansion bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// Position in the currently displayed sequence
    Position(usize),
    /// Compact JSON text of the row-id value, so `1` and `"1"` differ
    Id(String),
}

/// Expanded/collapsed flag per row key. Absent keys are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    flags: HashMap<RowKey, bool>,
}

impl ExpansionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag for one row and return its new value.
    pub fn toggle(&mut self, key: RowKey) -> bool {
        let flag = self.flags.entry(key).or_insert(false);
        *flag = !*flag;
        *flag
    }

    #[must_use]
    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Number of rows currently expanded.
    #[must_use]
    pub fn expanded_count(&self) -> usize {
        self.flags.values().filter(|flag| **flag).count()
    }

    /// Collapse everything.
    pub fn clear(&mut self) {
        self.flags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_collapsed() {
        let state = ExpansionState::new();
        assert!(!state.is_expanded(&RowKey::Position(0)));
        assert_eq!(state.expanded_count(), 0);
    }

    #[test]
    fn test_toggle_pair_is_identity() {
        let mut state = ExpansionState::new();
        assert!(state.toggle(RowKey::Position(2)));
        assert!(!state.toggle(RowKey::Position(2)));
        assert!(!state.is_expanded(&RowKey::Position(2)));
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut state = ExpansionState::new();
        state.toggle(RowKey::Position(0));
        state.toggle(RowKey::Position(2));
        assert!(state.is_expanded(&RowKey::Position(0)));
        assert!(!state.is_expanded(&RowKey::Position(1)));
        assert!(state.is_expanded(&RowKey::Position(2)));

        state.toggle(RowKey::Position(2));
        assert!(state.is_expanded(&RowKey::Position(0)));
        assert!(!state.is_expanded(&RowKey::Position(1)));
        assert_eq!(state.expanded_count(), 1);
    }

    #[test]
    fn test_id_and_position_keys_do_not_collide() {
        let mut state = ExpansionState::new();
        state.toggle(RowKey::Id("0".into()));
        assert!(!state.is_expanded(&RowKey::Position(0)));
        assert!(state.is_expanded(&RowKey::Id("0".into())));

        state.clear();
        assert_eq!(state.expanded_count(), 0);
    }
}
