//! Configuration for tables described in files.
//!
//! - Typed table descriptions ([`TableConfig`]) with a fluent builder
//! - Validation ([`Validatable`])
//! - YAML loading and discovery ([`file`])
//! - JSON Schema generation for editor support
//!
//! # Configuration File
//!
//! ```yaml
//! columns:
//!   - key: issuer
//!     header: Issuer
//!     sortable: true
//!   - key: marketPrice
//!     header: Market Price
//!     format: { kind: number, decimals: 2 }
//! initial:
//!   sort: { key: issuer, direction: asc }
//! ```

pub mod file;
mod types;
mod validation;

pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, load_config_file,
    load_or_default,
};
pub use types::{
    ColumnConfig, DetailConfig, InitialStateConfig, OutputConfig, TableConfig, TableConfigBuilder,
    ValueFormat, ViewConfig,
};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON Schema for the `TableConfig` file format.
///
/// # Errors
///
/// Fails only if the schema cannot be serialized.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(TableConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_mentions_columns() {
        let schema = generate_json_schema().expect("schema serializes");
        assert!(schema.contains("\"columns\""));
        assert!(schema.contains("TableConfig"));
    }
}
