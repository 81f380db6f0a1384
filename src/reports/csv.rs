//! CSV report generator.
//!
//! Writes the visible rows with their displayed cell text, suitable for
//! spreadsheet import. Expansion content is not included.

use super::{ReportError, ReportFormat, ReportGenerator, ReportOptions};
use crate::model::Row;
use crate::table::TableController;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn csv_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells
        .map(|c| format!("\"{}\"", escape_csv(c)))
        .collect::<Vec<_>>()
        .join(",")
}

impl ReportGenerator for CsvReporter {
    fn generate(
        &self,
        table: &TableController<Row>,
        _options: &ReportOptions,
    ) -> Result<String, ReportError> {
        let columns = table.columns();
        let mut content = csv_line(columns.iter().map(|c| c.header()));
        content.push('\n');

        for vr in table.view().iter() {
            let cells: Vec<String> = columns.iter().map(|c| c.display(vr.row)).collect();
            content.push_str(&csv_line(cells.iter().map(String::as_str)));
            content.push('\n');
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace('\n', " ")
}
