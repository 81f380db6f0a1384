//! The ordered view a controller hands to its renderer.

/// One visible row.
#[derive(Debug)]
pub struct ViewRow<'a, R> {
    /// Position in the displayed sequence
    pub position: usize,
    /// Index of the row in the caller's dataset
    pub source_index: usize,
    /// The caller's row, not a copy
    pub row: &'a R,
    pub expanded: bool,
    /// Expansion content, present only for expanded rows
    pub detail: Option<String>,
}

/// Result of running the filter and sort pipeline.
///
/// An empty result is reported as [`TableView::NoRows`] so a renderer can
/// tell "nothing matched" apart from data that has not arrived yet.
#[derive(Debug)]
pub enum TableView<'a, R> {
    NoRows,
    Rows(Vec<ViewRow<'a, R>>),
}

impl<'a, R> TableView<'a, R> {
    #[must_use]
    pub const fn is_no_rows(&self) -> bool {
        matches!(self, Self::NoRows)
    }

    #[must_use]
    pub fn rows(&self) -> &[ViewRow<'a, R>] {
        match self {
            Self::NoRows => &[],
            Self::Rows(rows) => rows,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ViewRow<'a, R>> {
        self.rows().iter()
    }

    /// `(row, expanded)` pairs in display order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'a R, bool)> + '_ {
        self.rows().iter().map(|r| (r.row, r.expanded))
    }
}
