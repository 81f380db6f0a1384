//! Data model shared by every table: rows, raw values and the column schema.

mod column;
mod dataset;
mod value;

pub use column::{Column, Columns, RenderFn};
pub use dataset::{dataset_from_value, load_dataset, parse_dataset_str};
pub use value::{Record, Row, compare_values, filter_text, stringify};
