//! **A headless engine for filterable, sortable, expandable tables.**
//!
//! `table-engine` holds the interaction state of a data table over a dataset of
//! records: per-column filter text, a single-column sort, and per-row
//! expansion. Every change runs the dataset through the same pipeline
//! (filter, then sort) and yields an ordered view that a renderer can draw
//! however it likes. The engine never draws anything itself.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`Column`] schema, the [`Record`] trait rows must
//!   implement, value comparison and stringification, and JSON dataset loading.
//! - **[`table`]**: the [`TableController`] with its filter, sort and
//!   expansion engines.
//! - **[`config`]**: YAML-loadable table descriptions ([`TableConfig`]) that
//!   build controllers.
//! - **[`reports`]**: table, JSON and CSV rendering of a controller's view.
//! - **[`cli`]**: handlers behind the `table-engine` binary.
//!
//! ## Getting Started
//!
//! ```
//! use serde_json::json;
//! use table_engine::{Column, Columns, Row, TableController};
//!
//! fn main() -> table_engine::Result<()> {
//!     let rows: Vec<Row> = vec![
//!         json!({"issuer": "JP Morgan", "status": "Pending"}),
//!         json!({"issuer": "Goldman Sachs", "status": "Completed"}),
//!     ]
//!     .into_iter()
//!     .filter_map(|v| v.as_object().cloned())
//!     .collect();
//!
//!     let columns = Columns::new(vec![
//!         Column::new("issuer", "Issuer").sortable(),
//!         Column::new("status", "Status"),
//!     ])?;
//!     let mut table = TableController::new(columns, rows);
//!
//!     table.toggle_sort("issuer");
//!     let first = table.visible_rows().next().and_then(|r| r.get("issuer"));
//!     assert_eq!(first, Some(&json!("Goldman Sachs")));
//!
//!     table.set_filter("status", "PEND");
//!     assert_eq!(table.len(), 1);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod reports;
pub mod table;

// Re-export main types for convenience
pub use config::{
    ColumnConfig, ConfigError, DetailConfig, TableConfig, TableConfigBuilder, Validatable,
    ValueFormat, ViewConfig,
};
pub use error::{ErrorContext, Result, TableError};
pub use model::{Column, Columns, Record, Row, load_dataset, parse_dataset_str};
pub use reports::{ReportFormat, ReportGenerator, ReportOptions, create_reporter};
pub use table::{
    FilterState, SortDirection, SortState, TableBuilder, TableController, TableState, TableView,
    ViewRow,
};
