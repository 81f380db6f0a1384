//! Column model: the static schema of a table.

use super::value::{Record, stringify};
use crate::error::{Result, SchemaErrorKind, TableError};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Display transform for a column: `(raw value, whole row) -> text`.
///
/// Must be pure. It only shapes what a renderer shows and is never consulted
/// by filtering or sorting.
pub type RenderFn<R> = Arc<dyn Fn(Option<&Value>, &R) -> String + Send + Sync>;

/// One column of a table.
pub struct Column<R> {
    key: String,
    header: String,
    sortable: bool,
    render: Option<RenderFn<R>>,
}

impl<R> Column<R> {
    /// Create a non-sortable column without a render transform.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            render: None,
        }
    }

    /// Mark the column as sortable.
    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set whether the column is sortable.
    #[must_use]
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Attach a display transform.
    #[must_use]
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &R) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub const fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub const fn has_render(&self) -> bool {
        self.render.is_some()
    }
}

impl<R: Record> Column<R> {
    /// Text shown for this column's cell in `row`.
    pub fn display(&self, row: &R) -> String {
        let value = row.field(&self.key);
        match &self.render {
            Some(render) => render(value, row),
            None => stringify(value).into_owned(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// An ordered set of columns with unique, non-empty keys.
pub struct Columns<R> {
    columns: Vec<Column<R>>,
}

impl<R> Columns<R> {
    /// Validate and wrap a column list.
    pub fn new(columns: Vec<Column<R>>) -> Result<Self> {
        for (idx, column) in columns.iter().enumerate() {
            if column.key.is_empty() {
                return Err(TableError::schema(
                    "building column set",
                    SchemaErrorKind::EmptyKey(idx),
                ));
            }
            if columns[..idx].iter().any(|c| c.key == column.key) {
                return Err(TableError::schema(
                    "building column set",
                    SchemaErrorKind::DuplicateKey(column.key.clone()),
                ));
            }
        }
        Ok(Self { columns })
    }

    pub fn get(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column<R>> {
        self.columns.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::key)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<R> Clone for Columns<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> fmt::Debug for Columns<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.columns).finish()
    }
}

impl<'a, R> IntoIterator for &'a Columns<R> {
    type Item = &'a Column<R>;
    type IntoIter = std::slice::Iter<'a, Column<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
