//! Unified error types for table-engine.
//!
//! The filter, sort and expansion engines never fail: malformed row data
//! degrades locally. Errors only arise at the edges, when a column schema is
//! declared, when a dataset is decoded, or when files are read.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for table-engine operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TableError {
    /// The column schema is unusable
    #[error("Invalid column schema: {context}")]
    Schema {
        context: String,
        #[source]
        source: SchemaErrorKind,
    },

    /// The dataset could not be decoded into rows
    #[error("Invalid dataset: {context}")]
    Dataset {
        context: String,
        #[source]
        source: DatasetErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific column schema error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaErrorKind {
    #[error("Duplicate column key '{0}'")]
    DuplicateKey(String),

    #[error("Column at index {0} has an empty key")]
    EmptyKey(usize),
}

/// Specific dataset error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DatasetErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Expected a top-level array of rows, found {0}")]
    NotAnArray(&'static str),

    #[error("Row {index} is not an object (found {found})")]
    RowNotObject { index: usize, found: &'static str },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for table-engine operations
pub type Result<T> = std::result::Result<T, TableError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl TableError {
    /// Create a schema error with context
    pub fn schema(context: impl Into<String>, source: SchemaErrorKind) -> Self {
        Self::Schema {
            context: context.into(),
            source,
        }
    }

    /// Create a dataset error with context
    pub fn dataset(context: impl Into<String>, source: DatasetErrorKind) -> Self {
        Self::Dataset {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for TableError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        Self::dataset(
            "JSON deserialization",
            DatasetErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// ```ignore
/// use table_engine::error::ErrorContext;
///
/// let rows = parse_dataset_str(&content)
///     .with_context(|| format!("loading {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<TableError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: TableError, new_ctx: &str) -> TableError {
    match err {
        TableError::Schema {
            context: existing,
            source,
        } => TableError::Schema {
            context: chain_context(new_ctx, &existing),
            source,
        },
        TableError::Dataset {
            context: existing,
            source,
        } => TableError::Dataset {
            context: chain_context(new_ctx, &existing),
            source,
        },
        TableError::Io {
            path,
            message,
            source,
        } => TableError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = TableError::schema("building columns", SchemaErrorKind::DuplicateKey("id".into()));
        assert_eq!(err.to_string(), "Invalid column schema: building columns");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("Duplicate column key 'id'"));
    }

    #[test]
    fn test_context_chaining() {
        let result: std::result::Result<(), TableError> = Err(TableError::dataset(
            "decoding rows",
            DatasetErrorKind::NotAnArray("object"),
        ));
        let err = result.context("loading transactions.json").unwrap_err();
        match err {
            TableError::Dataset { context, .. } => {
                assert_eq!(context, "loading transactions.json: decoding rows");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_io_conversion_keeps_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TableError = io.into();
        assert!(matches!(err, TableError::Io { path: None, .. }));
        assert!(err.to_string().contains("missing"));
    }
}
