//! Value formats used as column render transforms.

use crate::config::ValueFormat;
use crate::model::stringify;
use serde_json::Value;

impl ValueFormat {
    /// Display text for a raw value. Non-numeric values fall back to their
    /// plain text.
    #[must_use]
    pub fn apply(&self, value: Option<&Value>) -> String {
        let number = value.and_then(Value::as_f64);
        match (self, number) {
            (Self::Plain, _) | (_, None) => stringify(value).into_owned(),
            (Self::Number { decimals: Some(d) }, Some(x)) => {
                group_thousands(&format!("{x:.prec$}", prec = usize::from(*d)))
            }
            (Self::Number { decimals: None }, Some(x)) => group_thousands(&shortest(value, x)),
            (Self::Fixed { decimals }, Some(x)) => {
                format!("{x:.prec$}", prec = usize::from(*decimals))
            }
            (Self::Percent { decimals }, Some(x)) => {
                format!("{x:.prec$}%", prec = usize::from(*decimals))
            }
        }
    }
}

/// Integers as-is, floats with at most three decimals and no trailing zeros.
fn shortest(value: Option<&Value>, x: f64) -> String {
    if let Some(n) = value.and_then(Value::as_i64) {
        return n.to_string();
    }
    if let Some(n) = value.and_then(Value::as_u64) {
        return n.to_string();
    }
    let fixed = format!("{x:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Insert `,` between groups of three integer digits.
fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = text
        .strip_prefix('-')
        .map_or(("", text), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_grouping() {
        let format = ValueFormat::Number { decimals: None };
        assert_eq!(format.apply(Some(&json!(100))), "100");
        assert_eq!(format.apply(Some(&json!(100000))), "100,000");
        assert_eq!(format.apply(Some(&json!(-1234567))), "-1,234,567");
        assert_eq!(format.apply(Some(&json!(1025.5))), "1,025.5");
        assert_eq!(format.apply(Some(&json!(1.23456))), "1.235");
    }

    #[test]
    fn test_number_with_decimals() {
        let format = ValueFormat::Number { decimals: Some(2) };
        assert_eq!(format.apply(Some(&json!(1025.5))), "1,025.50");
        assert_eq!(format.apply(Some(&json!(1134.25))), "1,134.25");
        assert_eq!(format.apply(Some(&json!(7))), "7.00");
    }

    #[test]
    fn test_fixed_and_percent() {
        assert_eq!(
            ValueFormat::Fixed { decimals: 1 }.apply(Some(&json!(2.25))),
            "2.2"
        );
        assert_eq!(
            ValueFormat::Percent { decimals: 2 }.apply(Some(&json!(4.5))),
            "4.50%"
        );
    }

    #[test]
    fn test_non_numeric_falls_back() {
        let format = ValueFormat::Percent { decimals: 2 };
        assert_eq!(format.apply(Some(&json!("n/a"))), "n/a");
        assert_eq!(format.apply(None), "");
        assert_eq!(ValueFormat::Plain.apply(Some(&json!(1000))), "1000");
    }
}
