//! Decoding datasets from JSON.
//!
//! A dataset is a JSON array of objects. Fetching and mapping remote data
//! into that shape happens before the engine ever sees it.

use super::value::Row;
use crate::error::{DatasetErrorKind, ErrorContext, Result, TableError};
use serde_json::Value;
use std::path::Path;

/// Decode a dataset from a JSON string.
pub fn parse_dataset_str(content: &str) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_str(content)?;
    dataset_from_value(value)
}

/// Decode a dataset from an already parsed JSON value.
pub fn dataset_from_value(value: Value) -> Result<Vec<Row>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(TableError::dataset(
                "decoding rows",
                DatasetErrorKind::NotAnArray(json_type_name(&other)),
            ));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            other => Err(TableError::dataset(
                "decoding rows",
                DatasetErrorKind::RowNotObject {
                    index,
                    found: json_type_name(&other),
                },
            )),
        })
        .collect()
}

/// Read and decode a dataset file.
pub fn load_dataset(path: &Path) -> Result<Vec<Row>> {
    let content = std::fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
    let rows = parse_dataset_str(&content)
        .with_context(|| format!("loading dataset {}", path.display()))?;
    tracing::debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dataset() {
        let rows = parse_dataset_str(r#"[{"id": 1, "issuer": "JP Morgan"}, {"id": 2}]"#)
            .expect("valid dataset");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("issuer"), Some(&Value::from("JP Morgan")));
    }

    #[test]
    fn test_parse_empty_dataset() {
        let rows = parse_dataset_str("[]").expect("empty array is a valid dataset");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_reject_non_array() {
        let err = parse_dataset_str(r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(
            err,
            TableError::Dataset {
                source: DatasetErrorKind::NotAnArray("object"),
                ..
            }
        ));
    }

    #[test]
    fn test_reject_non_object_row() {
        let err = parse_dataset_str(r#"[{"id": 1}, 7]"#).unwrap_err();
        assert!(matches!(
            err,
            TableError::Dataset {
                source: DatasetErrorKind::RowNotObject {
                    index: 1,
                    found: "number"
                },
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_dataset_str("[{").unwrap_err();
        assert!(matches!(
            err,
            TableError::Dataset {
                source: DatasetErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/rows.json")).unwrap_err();
        assert!(matches!(err, TableError::Io { path: Some(_), .. }));
    }
}
