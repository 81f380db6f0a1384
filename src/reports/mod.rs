//! Rendering a table's current view.
//!
//! Reporters are callers of the engine: they read a controller's view and
//! column schema and never touch its state.
//! - Table: aligned terminal output with sort indicators and expanded detail
//! - JSON: structured output for programmatic use
//! - CSV: spreadsheet import

mod csv;
mod detail;
mod format;
mod json;
mod layout;
mod table;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use table::{NO_DATA_MESSAGE, TableReporter};

use crate::config::TableConfig;
use crate::model::Row;
use crate::table::TableController;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Write;
use thiserror::Error;

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Aligned table for the terminal
    #[default]
    Table,
    /// Structured JSON output
    Json,
    /// CSV for spreadsheet import
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Presentation options shared by all reporters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub title: Option<String>,
    pub colored: bool,
    pub max_column_width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: None,
            colored: false,
            max_column_width: 40,
        }
    }
}

impl ReportOptions {
    /// Options taken from a table config. Color is still subject to `NO_COLOR`.
    #[must_use]
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            title: config.title.clone(),
            colored: should_use_color(config.output.no_color),
            max_column_width: config.output.max_column_width,
        }
    }
}

/// Determine if color should be used based on flags and environment
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the controller's current view.
    fn generate(
        &self,
        table: &TableController<Row>,
        options: &ReportOptions,
    ) -> Result<String, ReportError>;

    /// Write the report to a writer.
    fn write_report(
        &self,
        table: &TableController<Row>,
        options: &ReportOptions,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(table, options)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a reporter for the given format.
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Table => Box::new(TableReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}
