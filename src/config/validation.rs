//! Configuration validation for table-engine.
//!
//! Filter and sort keys are not checked against the column list: the engine
//! accepts unknown keys at runtime and so does the config.

use super::types::{ColumnConfig, DetailConfig, OutputConfig, TableConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for TableConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.columns.is_empty() {
            errors.push(ConfigError::new("columns", "At least one column is required"));
        }
        errors.extend(validate_columns("columns", &self.columns));

        if let Some(row_id) = &self.row_id
            && row_id.is_empty()
        {
            errors.push(ConfigError::new("row_id", "Row id field must not be empty"));
        }

        if let Some(detail) = &self.detail {
            errors.extend(detail.validate());
        }

        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for DetailConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.field.is_empty() {
            errors.push(ConfigError::new("detail.field", "Detail field must not be empty"));
        }
        errors.extend(validate_columns("detail.columns", &self.columns));
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_column_width < 4 {
            errors.push(ConfigError::new(
                "output.max_column_width",
                format!(
                    "Column width must be at least 4, got {}",
                    self.max_column_width
                ),
            ));
        }
        errors
    }
}

fn validate_columns(field: &str, columns: &[ColumnConfig]) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    for (idx, column) in columns.iter().enumerate() {
        if column.key.is_empty() {
            errors.push(ConfigError::new(
                format!("{field}[{idx}].key"),
                "Column key must not be empty",
            ));
        } else if columns[..idx].iter().any(|c| c.key == column.key) {
            errors.push(ConfigError::new(
                format!("{field}[{idx}].key"),
                format!("Duplicate column key '{}'", column.key),
            ));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SortState;

    fn valid_config() -> TableConfig {
        TableConfig::builder()
            .column(ColumnConfig::new("id"))
            .column(ColumnConfig::new("issuer"))
            .build()
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().is_valid());
    }

    #[test]
    fn test_empty_columns() {
        let errors = TableConfig::default().validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "columns");
    }

    #[test]
    fn test_duplicate_and_empty_keys() {
        let config = TableConfig::builder()
            .column(ColumnConfig::new("id"))
            .column(ColumnConfig::new(""))
            .column(ColumnConfig::new("id"))
            .build();
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["columns[1].key", "columns[2].key"]);
    }

    #[test]
    fn test_detail_field_required() {
        let mut config = valid_config();
        config.detail = Some(DetailConfig::default());
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "detail.field"));
    }

    #[test]
    fn test_empty_row_id() {
        let mut config = valid_config();
        config.row_id = Some(String::new());
        assert!(!config.is_valid());
    }

    #[test]
    fn test_narrow_width() {
        let config = TableConfig::builder()
            .column(ColumnConfig::new("id"))
            .max_column_width(2)
            .build();
        let errors = config.validate();
        assert_eq!(errors[0].field, "output.max_column_width");
        assert!(errors[0].to_string().contains("at least 4"));
    }

    #[test]
    fn test_unknown_sort_and_filter_keys_are_allowed() {
        let config = TableConfig::builder()
            .column(ColumnConfig::new("id"))
            .filter("nope", "x")
            .sort(SortState::asc("also-nope"))
            .build();
        assert!(config.is_valid());
    }
}
