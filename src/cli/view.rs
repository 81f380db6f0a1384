//! View command handler.
//!
//! Implements the `view` subcommand: load a dataset, apply the configured
//! table and the requested interactions, and print the resulting view.

use super::exit_codes;
use super::output::{OutputTarget, write_output};
use crate::config::{Validatable, ViewConfig};
use crate::model::{Row, load_dataset};
use crate::reports::{ReportOptions, create_reporter};
use anyhow::{Context, Result, bail};

/// Run the view command
pub fn run_view(mut config: ViewConfig) -> Result<i32> {
    let rows = load_dataset(&config.dataset)?;
    config.table.infer_columns(&rows);
    let errors = config.table.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid table configuration:\n  {}", details.join("\n  "));
    }

    let mut table = config
        .table
        .table_builder(rows)
        .context("Failed to build table")?
        .on_row_click(|row: &Row| {
            let text = serde_json::to_string(row).unwrap_or_default();
            tracing::info!("Row clicked: {text}");
        })
        .build();
    config.table.apply_initial_state(&mut table);

    for (key, text) in &config.filters {
        table.set_filter(key, text.as_str());
    }
    for key in &config.sort_toggles {
        table.toggle_sort(key);
    }
    for &position in &config.clicks {
        if !table.click_row(position) {
            tracing::warn!(
                "No row at position {position}; {} rows are shown",
                table.len()
            );
        }
    }

    let target = OutputTarget::from_option(config.output_file.clone());
    let mut options = ReportOptions::from_config(&config.table);
    options.colored = options.colored && target.is_terminal();

    let reporter = create_reporter(config.table.output.format);
    let report = reporter
        .generate(&table, &options)
        .with_context(|| format!("Failed to render {} report", reporter.format()))?;
    write_output(&report, &target, config.quiet)?;

    if table.view().is_no_rows() {
        if !config.quiet {
            tracing::info!("No rows match the current filters");
        }
        return Ok(exit_codes::NO_ROWS);
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnConfig, TableConfig};
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    fn write_dataset(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "alpha"}, {"id": 2, "name": "beta"}]"#,
        )
        .unwrap();
        path
    }

    fn view_config(dataset: std::path::PathBuf, output: std::path::PathBuf) -> ViewConfig {
        ViewConfig {
            dataset,
            table: TableConfig::builder()
                .column(ColumnConfig::new("id"))
                .column(ColumnConfig {
                    sortable: true,
                    ..ColumnConfig::new("name")
                })
                .output_format(ReportFormat::Csv)
                .build(),
            filters: Vec::new(),
            sort_toggles: Vec::new(),
            clicks: Vec::new(),
            output_file: Some(output),
            quiet: true,
        }
    }

    #[test]
    fn test_run_view_sorted_desc() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out.csv");
        let mut config = view_config(write_dataset(&tmp), out.clone());
        config.sort_toggles = vec!["name".into(), "name".into()];

        assert_eq!(run_view(config).unwrap(), exit_codes::SUCCESS);
        let text = std::fs::read_to_string(out).unwrap();
        assert_eq!(text, "\"id\",\"name\"\n\"2\",\"beta\"\n\"1\",\"alpha\"\n");
    }

    #[test]
    fn test_run_view_no_rows_exit_code() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out.csv");
        let mut config = view_config(write_dataset(&tmp), out);
        config.filters = vec![("name".into(), "gamma".into())];

        assert_eq!(run_view(config).unwrap(), exit_codes::NO_ROWS);
    }

    #[test]
    fn test_run_view_invalid_config() {
        let tmp = TempDir::new().unwrap();
        let mut config = view_config(write_dataset(&tmp), tmp.path().join("out.csv"));
        config.table.columns.push(ColumnConfig::new("id"));

        let err = run_view(config).unwrap_err();
        assert!(err.to_string().contains("Invalid table configuration"));
    }

    #[test]
    fn test_run_view_infers_columns() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out.csv");
        let mut config = view_config(write_dataset(&tmp), out.clone());
        config.table.columns.clear();
        config.clicks = vec![0, 5];

        assert_eq!(run_view(config).unwrap(), exit_codes::SUCCESS);
        let text = std::fs::read_to_string(out).unwrap();
        assert!(text.starts_with("\"id\",\"name\"\n"));
    }

    #[test]
    fn test_run_view_missing_dataset() {
        let tmp = TempDir::new().unwrap();
        let config = view_config(tmp.path().join("nope.json"), tmp.path().join("out.csv"));
        assert!(run_view(config).is_err());
    }
}
