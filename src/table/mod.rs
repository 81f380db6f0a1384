//! The tabular data engine.
//!
//! - [`filter`]: per-column substring filters combined with AND
//! - [`sort`]: stable single-column sort and its toggle state machine
//! - [`expansion`]: per-row expanded/collapsed flags
//! - [`TableController`]: composes the three and exposes the interaction
//!   contract (`set_filter`, `toggle_sort`, `click_row`)
//!
//! Filter and sort are pure functions over a borrowed dataset; they can be
//! used without a controller.
//!
//! ```
//! use serde_json::json;
//! use table_engine::model::{Column, Columns, Row};
//! use table_engine::table::TableController;
//!
//! let rows: Vec<Row> = vec![
//!     json!({"name": "Alpha", "type": "X"}).as_object().cloned().unwrap_or_default(),
//!     json!({"name": "Beta", "type": "X"}).as_object().cloned().unwrap_or_default(),
//! ];
//! let columns = Columns::new(vec![
//!     Column::new("name", "Name").sortable(),
//!     Column::new("type", "Type"),
//! ])?;
//!
//! let mut table = TableController::new(columns, rows);
//! table.set_filter("name", "alp");
//! assert_eq!(table.len(), 1);
//! # Ok::<(), table_engine::TableError>(())
//! ```

mod controller;
pub mod expansion;
pub mod filter;
pub mod sort;
mod view;

pub use controller::{ExpansionFn, RowClickFn, TableBuilder, TableController, TableState};
pub use expansion::{ExpansionState, RowKey};
pub use filter::{FilterState, apply_filters, filter_indices, row_matches};
pub use sort::{SortDirection, SortState, apply_sort, sort_indices, toggle_sort};
pub use view::{TableView, ViewRow};
