//! Expansion content for configured tables.

use super::layout::Grid;
use crate::config::{ColumnConfig, DetailConfig};
use crate::model::{Row, stringify};
use serde_json::Value;

const DETAIL_COLUMN_WIDTH: usize = 40;

impl DetailConfig {
    /// Render the detail field of `row`.
    ///
    /// A list of objects becomes a nested table using the configured columns
    /// (or the first object's keys); any other value is shown after the title.
    #[must_use]
    pub fn render(&self, row: &Row) -> String {
        let title = self.title.as_deref().unwrap_or(&self.field);
        match row.get(&self.field) {
            None | Some(Value::Null) => format!("{title}: (no details)"),
            Some(Value::Array(items)) if items.is_empty() => format!("{title}: (no details)"),
            Some(Value::Array(items)) if items.iter().all(Value::is_object) => {
                let objects: Vec<&Row> = items.iter().filter_map(Value::as_object).collect();
                self.render_nested(title, &objects)
            }
            Some(other) => format!("{title}: {}", stringify(Some(other))),
        }
    }

    fn render_nested(&self, title: &str, objects: &[&Row]) -> String {
        let columns: Vec<ColumnConfig> = if self.columns.is_empty() {
            objects
                .first()
                .map(|first| first.keys().map(ColumnConfig::new).collect())
                .unwrap_or_default()
        } else {
            self.columns.clone()
        };
        let columns: Vec<_> = columns.iter().map(ColumnConfig::to_column).collect();

        let header: Vec<String> = columns.iter().map(|c| c.header().to_string()).collect();
        let cells: Vec<Vec<String>> = objects
            .iter()
            .map(|obj| columns.iter().map(|c| c.display(*obj)).collect())
            .collect();

        let grid = Grid::fit(&header, &cells, DETAIL_COLUMN_WIDTH);
        let mut lines = Vec::with_capacity(cells.len() + 3);
        lines.push(title.to_string());
        lines.push(grid.line(&header));
        lines.push(grid.separator());
        lines.extend(cells.iter().map(|row| grid.line(row)));
        lines.join("\n")
    }
}
