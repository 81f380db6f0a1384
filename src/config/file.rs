//! Configuration file loading and discovery.
//!
//! Table configs are YAML files found by explicit path or in a few standard
//! locations.

use super::types::TableConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".table-engine.yaml",
    ".table-engine.yml",
    "table-engine.yaml",
    "table-engine.yml",
];

/// Discover a config file by searching standard locations.
///
/// An explicit path is returned as is, even when it does not exist, so the
/// caller reports it instead of silently using another file. Otherwise the
/// search order is:
/// 1. Current directory
/// 2. User config directory (~/.config/table-engine/)
/// 3. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join("table-engine"))
    {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load a `TableConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<TableConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: TableConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from the discovered file, or return the default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (TableConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (TableConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (TableConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config.
#[must_use]
pub fn generate_example_config() -> String {
    r"# table-engine configuration
# Place this file at .table-engine.yaml in your working directory
# or ~/.config/table-engine/table-engine.yaml.
#
# Command-line flags are applied on top of these settings.

title: Transactions

# Columns in display order. `header` defaults to the key.
# format kinds: plain, number (decimals optional), fixed, percent
columns:
  - key: status
    header: Status
  - key: description
    header: Description
  - key: lastTrade
    header: Last Trade
    sortable: true
  - key: units
    header: Units
    format:
      kind: number
  - key: issuer
    header: Issuer
  - key: currency
    header: Currency
  - key: marketPrice
    header: Market Price
    format:
      kind: number
      decimals: 2

# Key expansion state by a stable id instead of the row position
# row_id: id

# Shown beneath a row when it is clicked
detail:
  field: tradeInfo
  title: Trade Information
  columns:
    - key: date
      header: Date
    - key: client
      header: Client
    - key: type
      header: Type
    - key: notional
      header: Notional
      format:
        kind: number

initial:
  filters: {}
  # sort:
  #   key: lastTrade
  #   direction: desc

output:
  # table, json, csv
  format: table
  no_color: false
  max_column_width: 40
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use crate::table::SortState;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".table-engine.yaml");
        std::fs::write(&config_path, "columns:\n  - key: id\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_explicit_missing_path_is_not_skipped() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.yaml");

        assert_eq!(discover_config_file(Some(&missing)), Some(missing.clone()));

        let (config, loaded_from) = load_or_default(Some(&missing));
        assert_eq!(config, TableConfig::default());
        assert!(loaded_from.is_none());
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("table.yaml");
        let yaml = r"
columns:
  - key: name
    header: Name
    sortable: true
  - key: spotPrice
    format:
      kind: fixed
initial:
  filters:
    name: app
  sort:
    key: spotPrice
    direction: desc
output:
  format: csv
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.columns.len(), 2);
        assert!(config.columns[0].sortable);
        assert_eq!(config.initial.filters.get("name"), "app");
        assert_eq!(config.initial.sort, Some(SortState::desc("spotPrice")));
        assert_eq!(config.output.format, ReportFormat::Csv);
        assert_eq!(config.output.max_column_width, 40);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/table.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "columns: [").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_default_falls_back_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "columns: [").unwrap();

        let (config, loaded_from) = load_or_default(Some(&config_path));
        assert_eq!(config, TableConfig::default());
        assert!(loaded_from.is_none());
    }

    #[test]
    fn test_example_config_parses() {
        let config: TableConfig = serde_yaml::from_str(&generate_example_config()).unwrap();
        assert_eq!(config.columns.len(), 7);
        assert!(config.detail.is_some());
        assert!(crate::config::Validatable::is_valid(&config));
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-table.yaml");
        std::fs::write(&config_path, "columns:\n  - key: id\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
