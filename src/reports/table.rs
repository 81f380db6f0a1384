//! Aligned table output for the terminal.

use super::layout::{Grid, ansi_color};
use super::{ReportError, ReportFormat, ReportGenerator, ReportOptions};
use crate::model::{Column, Row};
use crate::table::{SortState, TableController};

/// Shown in place of the body when no row survives the filters.
pub const NO_DATA_MESSAGE: &str = "No data found";

const DETAIL_INDENT: &str = "    ";

/// Table reporter for terminal output.
pub struct TableReporter;

impl TableReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Header text with the sort control for sortable columns.
fn header_cell(column: &Column<Row>, sort: Option<&SortState>) -> String {
    if !column.is_sortable() {
        return column.header().to_string();
    }
    let indicator = match sort {
        Some(s) if s.key == column.key() => s.direction.indicator(),
        _ => "↕",
    };
    format!("{} {indicator}", column.header())
}

impl ReportGenerator for TableReporter {
    fn generate(
        &self,
        table: &TableController<Row>,
        options: &ReportOptions,
    ) -> Result<String, ReportError> {
        let view = table.view();
        let sort = table.state().sort.as_ref();

        let header: Vec<String> = table
            .columns()
            .iter()
            .map(|c| header_cell(c, sort))
            .collect();
        let cells: Vec<Vec<String>> = view
            .iter()
            .map(|vr| table.columns().iter().map(|c| c.display(vr.row)).collect())
            .collect();
        let grid = Grid::fit(&header, &cells, options.max_column_width);

        let mut lines = Vec::new();
        if let Some(title) = &options.title {
            lines.push(ansi_color(title, "bold", options.colored));
            lines.push(String::new());
        }
        lines.push(ansi_color(&grid.line(&header), "bold", options.colored));
        lines.push(ansi_color(&grid.separator(), "dim", options.colored));

        if view.is_no_rows() {
            lines.push(NO_DATA_MESSAGE.to_string());
        }
        for (vr, row_cells) in view.iter().zip(&cells) {
            lines.push(grid.line(row_cells));
            if let Some(detail) = &vr.detail {
                lines.extend(detail.lines().map(|l| format!("{DETAIL_INDENT}{l}")));
            }
        }

        lines.push(String::new());
        lines.push(ansi_color(
            &format!("{} of {} rows", view.len(), table.rows().len()),
            "dim",
            options.colored,
        ));

        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}
