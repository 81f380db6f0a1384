//! Table controller: owns the interaction state and runs filter -> sort.

use super::expansion::{ExpansionState, RowKey};
use super::filter::{FilterState, filter_indices};
use super::sort::{SortState, sort_indices, toggle_sort};
use super::view::{TableView, ViewRow};
use crate::model::{Columns, Record};
use std::fmt;

/// Row-click callback. Receives the caller's original row.
pub type RowClickFn<R> = Box<dyn FnMut(&R) + Send>;

/// Expansion-content provider.
pub type ExpansionFn<R> = Box<dyn Fn(&R) -> String + Send + Sync>;

/// The three independent interaction axes of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    pub filters: FilterState,
    pub sort: Option<SortState>,
    pub expansion: ExpansionState,
}

/// Memoized pipeline output, keyed by what it was computed from.
#[derive(Debug, Default)]
struct ViewCache {
    key: Option<PipelineKey>,
    indices: Vec<usize>,
    recomputations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PipelineKey {
    generation: u64,
    filters: FilterState,
    sort: Option<SortState>,
}

/// A filtered, sorted, row-expandable view over a caller-owned dataset.
///
/// State changes only through [`set_filter`](Self::set_filter),
/// [`toggle_sort`](Self::toggle_sort) and [`click_row`](Self::click_row)
/// (plus [`set_rows`](Self::set_rows) when the data itself changes). Each of
/// them leaves the view up to date, so reading it is cheap.
pub struct TableController<R> {
    columns: Columns<R>,
    rows: Vec<R>,
    generation: u64,
    state: TableState,
    row_id: Option<String>,
    on_row_click: Option<RowClickFn<R>>,
    expansion_renderer: Option<ExpansionFn<R>>,
    cache: ViewCache,
}

impl<R: Record> TableController<R> {
    /// Controller with no callbacks and positional expansion keys.
    pub fn new(columns: Columns<R>, rows: Vec<R>) -> Self {
        TableBuilder::new(columns).rows(rows).build()
    }

    pub fn builder(columns: Columns<R>) -> TableBuilder<R> {
        TableBuilder::new(columns)
    }

    // ------------------------------------------------------------------
    // Interaction entry points
    // ------------------------------------------------------------------

    /// Set the filter text of one column and recompute.
    pub fn set_filter(&mut self, key: &str, text: impl Into<String>) {
        if !self.columns.contains(key) {
            tracing::debug!("Filter on unknown column '{key}'");
        }
        self.state.filters.set(key, text);
        self.refresh();
    }

    /// Remove every filter and recompute.
    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.refresh();
    }

    /// Activate the sort control of one column and recompute.
    pub fn toggle_sort(&mut self, key: &str) -> SortState {
        match self.columns.get(key) {
            None => tracing::debug!("Sort on unknown column '{key}'"),
            Some(column) if !column.is_sortable() => {
                tracing::debug!("Sort on column '{key}' which is not marked sortable");
            }
            Some(_) => {}
        }
        let next = toggle_sort(self.state.sort.as_ref(), key);
        tracing::trace!(key, direction = %next.direction, "Sort toggled");
        self.state.sort = Some(next.clone());
        self.refresh();
        next
    }

    /// Handle a click on the row shown at `position`.
    ///
    /// Toggles the row's expansion when an expansion provider is present,
    /// then passes the original row to the row-click callback. Returns
    /// `false` when no row is shown at `position`.
    pub fn click_row(&mut self, position: usize) -> bool {
        let Some(&source_index) = self.cache.indices.get(position) else {
            tracing::debug!(
                "Click on position {position} ignored, {} rows visible",
                self.cache.indices.len()
            );
            return false;
        };

        if self.expansion_renderer.is_some() {
            let key = self.row_key(position, source_index);
            let expanded = self.state.expansion.toggle(key);
            tracing::trace!(position, expanded, "Row expansion toggled");
        }

        if let Some(on_click) = self.on_row_click.as_mut() {
            on_click(&self.rows[source_index]);
        }
        true
    }

    /// Replace the dataset. Filter, sort and expansion state are kept.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.generation += 1;
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Outbound view
    // ------------------------------------------------------------------

    /// The current ordered view.
    pub fn view(&self) -> TableView<'_, R> {
        if self.cache.indices.is_empty() {
            return TableView::NoRows;
        }
        let rows = self
            .cache
            .indices
            .iter()
            .enumerate()
            .map(|(position, &source_index)| {
                let row = &self.rows[source_index];
                let expanded = self.expanded_at(position, source_index);
                let detail = if expanded {
                    self.expansion_renderer.as_ref().map(|render| render(row))
                } else {
                    None
                };
                ViewRow {
                    position,
                    source_index,
                    row,
                    expanded,
                    detail,
                }
            })
            .collect();
        TableView::Rows(rows)
    }

    /// Visible rows in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &R> {
        self.cache.indices.iter().map(|&idx| &self.rows[idx])
    }

    /// Dataset indices of the visible rows in display order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.cache.indices
    }

    /// Whether the row shown at `position` is expanded.
    pub fn is_expanded(&self, position: usize) -> bool {
        self.cache
            .indices
            .get(position)
            .is_some_and(|&source_index| self.expanded_at(position, source_index))
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.cache.indices.len()
    }

    /// Whether the view reports "no rows".
    pub fn is_empty(&self) -> bool {
        self.cache.indices.is_empty()
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn columns(&self) -> &Columns<R> {
        &self.columns
    }

    /// The caller's dataset, unmodified and in its original order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub const fn has_expansion(&self) -> bool {
        self.expansion_renderer.is_some()
    }

    /// How many times filter+sort actually ran.
    pub const fn recompute_count(&self) -> u64 {
        self.cache.recomputations
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn refresh(&mut self) {
        let up_to_date = self.cache.key.as_ref().is_some_and(|key| {
            key.generation == self.generation
                && key.filters == self.state.filters
                && key.sort == self.state.sort
        });
        if up_to_date {
            return;
        }

        let filtered = filter_indices(&self.rows, &self.state.filters);
        let sorted = sort_indices(&self.rows, &filtered, self.state.sort.as_ref());
        tracing::debug!(
            total = self.rows.len(),
            visible = sorted.len(),
            "Recomputed table view"
        );

        self.cache.key = Some(PipelineKey {
            generation: self.generation,
            filters: self.state.filters.clone(),
            sort: self.state.sort.clone(),
        });
        self.cache.indices = sorted;
        self.cache.recomputations += 1;
    }

    fn row_key(&self, position: usize, source_index: usize) -> RowKey {
        if let Some(id_key) = &self.row_id
            && let Some(id) = self.rows[source_index].field(id_key)
            && !id.is_null()
        {
            return RowKey::Id(id.to_string());
        }
        RowKey::Position(position)
    }

    fn expanded_at(&self, position: usize, source_index: usize) -> bool {
        self.expansion_renderer.is_some()
            && self
                .state
                .expansion
                .is_expanded(&self.row_key(position, source_index))
    }
}

impl<R: fmt::Debug> fmt::Debug for TableController<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableController")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("state", &self.state)
            .field("row_id", &self.row_id)
            .field("has_row_click", &self.on_row_click.is_some())
            .field("has_expansion", &self.expansion_renderer.is_some())
            .field("visible", &self.cache.indices.len())
            .finish()
    }
}

/// Builder for [`TableController`].
pub struct TableBuilder<R> {
    columns: Columns<R>,
    rows: Vec<R>,
    row_id: Option<String>,
    on_row_click: Option<RowClickFn<R>>,
    expansion_renderer: Option<ExpansionFn<R>>,
}

impl<R: Record> TableBuilder<R> {
    pub fn new(columns: Columns<R>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            row_id: None,
            on_row_click: None,
            expansion_renderer: None,
        }
    }

    #[must_use]
    pub fn rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    /// Callback invoked with the original row on every row click.
    #[must_use]
    pub fn on_row_click<F>(mut self, f: F) -> Self
    where
        F: FnMut(&R) + Send + 'static,
    {
        self.on_row_click = Some(Box::new(f));
        self
    }

    /// Enable row expansion with a content provider.
    #[must_use]
    pub fn expansion<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.expansion_renderer = Some(Box::new(f));
        self
    }

    /// Key expansion state by this field instead of by position.
    #[must_use]
    pub fn row_id(mut self, key: impl Into<String>) -> Self {
        self.row_id = Some(key.into());
        self
    }

    pub fn build(self) -> TableController<R> {
        let mut controller = TableController {
            columns: self.columns,
            rows: self.rows,
            generation: 0,
            state: TableState::default(),
            row_id: self.row_id,
            on_row_click: self.on_row_click,
            expansion_renderer: self.expansion_renderer,
            cache: ViewCache::default(),
        };
        controller.refresh();
        controller
    }
}
