//! JSON report generator.

use super::{ReportError, ReportFormat, ReportGenerator, ReportOptions};
use crate::model::Row;
use crate::table::{FilterState, SortState, TableController};
use indexmap::IndexMap;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Whether to pretty-print the output
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Emit compact single-line JSON.
    #[must_use]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    columns: Vec<JsonColumn<'a>>,
    filters: &'a FilterState,
    sort: Option<&'a SortState>,
    total_rows: usize,
    no_rows: bool,
    rows: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonColumn<'a> {
    key: &'a str,
    header: &'a str,
    sortable: bool,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    position: usize,
    source_index: usize,
    expanded: bool,
    cells: IndexMap<&'a str, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    row: &'a Row,
}

impl ReportGenerator for JsonReporter {
    fn generate(
        &self,
        table: &TableController<Row>,
        options: &ReportOptions,
    ) -> Result<String, ReportError> {
        let view = table.view();
        let columns = table.columns();

        let rows = view
            .iter()
            .map(|vr| JsonRow {
                position: vr.position,
                source_index: vr.source_index,
                expanded: vr.expanded,
                cells: columns
                    .iter()
                    .map(|c| (c.key(), c.display(vr.row)))
                    .collect(),
                detail: vr.detail.clone(),
                row: vr.row,
            })
            .collect();

        let report = JsonReport {
            title: options.title.as_deref(),
            columns: columns
                .iter()
                .map(|c| JsonColumn {
                    key: c.key(),
                    header: c.header(),
                    sortable: c.is_sortable(),
                })
                .collect(),
            filters: &table.state().filters,
            sort: table.state().sort.as_ref(),
            total_rows: table.rows().len(),
            no_rows: view.is_no_rows(),
            rows,
        };

        let output = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        output.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
