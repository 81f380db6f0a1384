//! Configuration types for table-engine.
//!
//! A [`TableConfig`] describes one table: its columns and their value
//! formats, the optional expansion detail, the state the table starts in,
//! and how it is printed.

use crate::error::Result;
use crate::model::{Column, Columns, Row};
use crate::reports::ReportFormat;
use crate::table::{FilterState, SortDirection, SortState, TableBuilder, TableController};
use indexmap::IndexSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Table Configuration
// ============================================================================

/// Complete description of a table, loadable from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TableConfig {
    /// Title printed above the table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Column definitions, in display order
    pub columns: Vec<ColumnConfig>,
    /// Field holding a stable row id; expansion state follows it when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_id: Option<String>,
    /// Expansion detail shown beneath clicked rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailConfig>,
    /// State the table starts in
    pub initial: InitialStateConfig,
    /// Output options
    pub output: OutputConfig,
}

impl TableConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> TableConfigBuilder {
        TableConfigBuilder::default()
    }

    /// The column schema described by this config.
    pub fn build_columns(&self) -> Result<Columns<Row>> {
        Columns::new(self.columns.iter().map(ColumnConfig::to_column).collect())
    }

    /// A controller over `rows` with the initial filters and sort applied.
    pub fn build_table(&self, rows: Vec<Row>) -> Result<TableController<Row>> {
        let mut table = self.table_builder(rows)?.build();
        self.apply_initial_state(&mut table);
        Ok(table)
    }

    /// Builder with columns, row id and detail expansion configured, for
    /// callers that also want a row-click callback.
    pub fn table_builder(&self, rows: Vec<Row>) -> Result<TableBuilder<Row>> {
        let mut builder = TableController::builder(self.build_columns()?).rows(rows);
        if let Some(row_id) = &self.row_id {
            builder = builder.row_id(row_id.clone());
        }
        if let Some(detail) = &self.detail {
            let detail = detail.clone();
            builder = builder.expansion(move |row: &Row| detail.render(row));
        }
        Ok(builder)
    }

    /// When no columns are configured, add one sortable column per field in
    /// order of first appearance across `rows`.
    pub fn infer_columns(&mut self, rows: &[Row]) {
        if !self.columns.is_empty() {
            return;
        }
        let keys: IndexSet<&str> = rows
            .iter()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect();
        tracing::debug!("Inferred {} columns from dataset", keys.len());
        self.columns = keys
            .into_iter()
            .map(|key| ColumnConfig {
                sortable: true,
                ..ColumnConfig::new(key)
            })
            .collect();
    }

    /// Apply the initial filters and sort through the controller's own
    /// entry points. The sort is replayed through the toggle state machine:
    /// one toggle for ascending, two for descending.
    pub fn apply_initial_state(&self, table: &mut TableController<Row>) {
        for (key, text) in self.initial.filters.iter() {
            table.set_filter(key, text);
        }
        if let Some(sort) = &self.initial.sort {
            table.toggle_sort(&sort.key);
            if sort.direction == SortDirection::Desc {
                table.toggle_sort(&sort.key);
            }
        }
    }
}

/// One column of a configured table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnConfig {
    /// Field name on each row
    pub key: String,
    /// Header text (defaults to the key)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Whether the column offers a sort control
    #[serde(default)]
    pub sortable: bool,
    /// Display format for cell values
    #[serde(default)]
    pub format: ValueFormat,
}

impl ColumnConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn header_text(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.key)
    }

    /// Engine column with this config's format as its render transform.
    pub fn to_column(&self) -> Column<Row> {
        let column = Column::new(self.key.clone(), self.header_text()).with_sortable(self.sortable);
        match self.format {
            ValueFormat::Plain => column,
            format => column.with_render(move |value, _row: &Row| format.apply(value)),
        }
    }
}

/// Display format for a column's values.
///
/// Formats only affect display; filtering and sorting see the raw value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValueFormat {
    /// Raw value text
    #[default]
    Plain,
    /// Thousands separators, optionally with fixed decimals (`1,025.50`)
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decimals: Option<u8>,
    },
    /// Fixed decimals without grouping (`1025.50`)
    Fixed {
        #[serde(default = "default_decimals")]
        decimals: u8,
    },
    /// Fixed decimals with a percent sign (`4.50%`)
    Percent {
        #[serde(default = "default_decimals")]
        decimals: u8,
    },
}

const fn default_decimals() -> u8 {
    2
}

/// Expansion content: a field of the row shown beneath it when expanded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DetailConfig {
    /// Row field holding the detail data
    pub field: String,
    /// Heading for the detail block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Columns of the nested table when the field holds a list of objects
    pub columns: Vec<ColumnConfig>,
}

/// Initial filters and sort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InitialStateConfig {
    /// Filter text per column key
    pub filters: FilterState,
    /// Initial sort column and direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortState>,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Disable colored output
    pub no_color: bool,
    /// Cells wider than this are truncated in table output
    pub max_column_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Table,
            no_color: false,
            max_column_width: 40,
        }
    }
}

// ============================================================================
// Builder for TableConfig
// ============================================================================

/// Builder for constructing a `TableConfig` with a fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct TableConfigBuilder {
    config: TableConfig,
}

impl TableConfigBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn column(mut self, column: ColumnConfig) -> Self {
        self.config.columns.push(column);
        self
    }

    pub fn row_id(mut self, key: impl Into<String>) -> Self {
        self.config.row_id = Some(key.into());
        self
    }

    pub fn detail(mut self, detail: DetailConfig) -> Self {
        self.config.detail = Some(detail);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.config.initial.filters.set(key, text);
        self
    }

    pub fn sort(mut self, sort: SortState) -> Self {
        self.config.initial.sort = Some(sort);
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    pub const fn max_column_width(mut self, width: usize) -> Self {
        self.config.output.max_column_width = width;
        self
    }

    pub fn build(self) -> TableConfig {
        self.config
    }
}

// ============================================================================
// Command-specific Configuration
// ============================================================================

/// Configuration for the `view` command.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Dataset file (JSON array of objects)
    pub dataset: PathBuf,
    /// Table description, usually loaded from a config file
    pub table: TableConfig,
    /// Filter edits applied in order after the initial state
    pub filters: Vec<(String, String)>,
    /// Sort-control activations applied in order
    pub sort_toggles: Vec<String>,
    /// Row clicks applied in order, by display position
    pub clicks: Vec<usize>,
    /// Output file (stdout if not specified)
    pub output_file: Option<PathBuf>,
    /// Suppress non-essential output
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn rows(values: Value) -> Vec<Row> {
        match values {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| v.as_object().cloned())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn ids(table: &TableController<Row>) -> Vec<i64> {
        table
            .visible_rows()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .collect()
    }

    #[test]
    fn test_value_format_yaml() {
        let column: ColumnConfig = serde_yaml::from_str(
            "key: coupon\nheader: Coupon\nsortable: true\nformat:\n  kind: percent\n",
        )
        .expect("valid column");
        assert_eq!(column.format, ValueFormat::Percent { decimals: 2 });
        assert!(column.sortable);

        let column: ColumnConfig = serde_yaml::from_str("key: units").expect("valid column");
        assert_eq!(column.format, ValueFormat::Plain);
        assert_eq!(column.header_text(), "units");
    }

    #[test]
    fn test_build_table_applies_initial_state() {
        let config = TableConfig::builder()
            .column(ColumnConfig::new("id"))
            .column(ColumnConfig {
                sortable: true,
                ..ColumnConfig::new("units")
            })
            .column(ColumnConfig::new("status"))
            .filter("status", "completed")
            .sort(SortState::desc("units"))
            .build();

        let table = config
            .build_table(rows(json!([
                {"id": 1, "units": 100, "status": "Completed"},
                {"id": 2, "units": 50, "status": "Completed"},
                {"id": 3, "units": 200, "status": "Pending"},
                {"id": 4, "units": 150, "status": "Completed"}
            ])))
            .expect("valid config");

        assert_eq!(ids(&table), vec![4, 1, 2]);
        assert_eq!(table.state().sort, Some(SortState::desc("units")));
    }

    #[test]
    fn test_build_columns_rejects_duplicates() {
        let config = TableConfig::builder()
            .column(ColumnConfig::new("id"))
            .column(ColumnConfig::new("id"))
            .build();
        assert!(config.build_columns().is_err());
    }

    #[test]
    fn test_detail_enables_expansion() {
        let config = TableConfig::builder()
            .column(ColumnConfig::new("id"))
            .detail(DetailConfig {
                field: "notes".into(),
                ..DetailConfig::default()
            })
            .build();
        let table = config
            .build_table(rows(json!([{"id": 1, "notes": "n"}])))
            .expect("valid config");
        assert!(table.has_expansion());
    }

    #[test]
    fn test_infer_columns() {
        let data = rows(json!([
            {"id": 1, "name": "a"},
            {"id": 2, "price": 3.5}
        ]));
        let mut config = TableConfig::new();
        config.infer_columns(&data);
        let keys: Vec<&str> = config.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["id", "name", "price"]);
        assert!(config.columns.iter().all(|c| c.sortable));

        let mut configured = TableConfig::builder().column(ColumnConfig::new("id")).build();
        configured.infer_columns(&data);
        assert_eq!(configured.columns.len(), 1);
    }

    #[test]
    fn test_output_defaults() {
        let output = OutputConfig::default();
        assert_eq!(output.format, ReportFormat::Table);
        assert_eq!(output.max_column_width, 40);
    }
}
