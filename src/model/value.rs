//! Raw field values and the two ways the engine looks at them.
//!
//! Filtering looks at a value's text ([`filter_text`]); sorting looks at the
//! value itself ([`compare_values`]). Neither ever consults a column's
//! render transform.

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::cmp::Ordering;

/// The crate's dynamic row type: a JSON object.
pub type Row = Map<String, Value>;

/// Field lookup by column key.
///
/// Rows are opaque to the engine beyond this lookup. A key the row does not
/// carry returns `None`, which the engine treats as an undefined value.
pub trait Record {
    fn field(&self, key: &str) -> Option<&Value>;
}

impl Record for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Record for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }
}

impl Record for indexmap::IndexMap<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Record for std::collections::HashMap<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Record for std::collections::BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<&Value> {
        (**self).field(key)
    }
}

/// Stable string conversion used by the filter engine.
///
/// Missing fields and `null` become the empty string. Arrays join their
/// elements with `,`; objects fall back to compact JSON text.
#[must_use]
pub fn stringify(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Bool(b)) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        Some(Value::Array(items)) => Cow::Owned(
            items
                .iter()
                .map(|item| stringify(Some(item)))
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(obj @ Value::Object(_)) => Cow::Owned(obj.to_string()),
    }
}

/// Text the filter engine matches against.
///
/// Falsy values (`0`, `0.0`, `false`) filter as the empty string, the same
/// as missing fields, so they only satisfy an empty constraint. Everything
/// else goes through [`stringify`].
#[must_use]
pub fn filter_text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        Some(Value::Bool(false)) => Cow::Borrowed(""),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Cow::Borrowed(""),
        other => stringify(other),
    }
}

/// Native ordering of two raw values.
///
/// Numbers compare numerically, strings lexicographically and booleans with
/// `false < true`. Every other pairing (missing fields, `null`, NaN-like
/// numbers, mixed types, arrays, objects) is incomparable and reported as
/// [`Ordering::Equal`], so the stable sort keeps such rows where they were.
#[must_use]
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => compare_numbers(x, y),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn compare_numbers(x: &serde_json::Number, y: &serde_json::Number) -> Ordering {
    // Integers compare exactly; anything involving a float goes through f64.
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a.cmp(&b);
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify(None), "");
        assert_eq!(stringify(Some(&Value::Null)), "");
        assert_eq!(stringify(Some(&json!("Goldman Sachs"))), "Goldman Sachs");
        assert_eq!(stringify(Some(&json!(1025.5))), "1025.5");
        assert_eq!(stringify(Some(&json!(100))), "100");
        assert_eq!(stringify(Some(&json!(0))), "0");
        assert_eq!(stringify(Some(&json!(false))), "false");
    }

    #[test]
    fn test_filter_text_collapses_falsy_values() {
        assert_eq!(filter_text(Some(&json!(0))), "");
        assert_eq!(filter_text(Some(&json!(0.0))), "");
        assert_eq!(filter_text(Some(&json!(false))), "");
        assert_eq!(filter_text(Some(&json!(true))), "true");
        assert_eq!(filter_text(Some(&json!(10))), "10");
        assert_eq!(filter_text(Some(&json!([0, false]))), "0,false");
    }

    #[test]
    fn test_stringify_composites() {
        assert_eq!(stringify(Some(&json!(["USD", 2, null]))), "USD,2,");
        assert_eq!(stringify(Some(&json!({"a": 1}))), r#"{"a":1}"#);
    }

    #[test]
    fn test_compare_numbers_and_strings() {
        assert_eq!(compare_values(Some(&json!(1)), Some(&json!(2))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(2.5)), Some(&json!(2))), Ordering::Greater);
        assert_eq!(compare_values(Some(&json!(-3)), Some(&json!(u64::MAX))), Ordering::Less);
        assert_eq!(
            compare_values(Some(&json!("2023-06-10")), Some(&json!("2023-06-15"))),
            Ordering::Less
        );
        assert_eq!(compare_values(Some(&json!(true)), Some(&json!(false))), Ordering::Greater);
    }

    #[test]
    fn test_compare_incomparable_is_equal() {
        assert_eq!(compare_values(None, Some(&json!(1))), Ordering::Equal);
        assert_eq!(compare_values(Some(&json!(1)), None), Ordering::Equal);
        assert_eq!(compare_values(Some(&Value::Null), Some(&json!(1))), Ordering::Equal);
        assert_eq!(compare_values(Some(&json!("1")), Some(&json!(1))), Ordering::Equal);
        assert_eq!(compare_values(Some(&json!("5")), Some(&json!(10))), Ordering::Equal);
        assert_eq!(compare_values(Some(&json!([1])), Some(&json!([2]))), Ordering::Equal);
    }

    #[test]
    fn test_record_lookup() {
        let row = json!({"name": "Alpha"});
        assert_eq!(row.field("name"), Some(&json!("Alpha")));
        assert_eq!(row.field("type"), None);
        assert_eq!(json!(42).field("name"), None);

        let map: Row = row.as_object().cloned().unwrap_or_default();
        assert_eq!(map.field("name"), Some(&json!("Alpha")));
    }
}
