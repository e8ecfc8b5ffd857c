//! Blankness of JSON values.

use serde_json::Value;

/// Whether `value` counts as blank for presence checks.
///
/// `null`, `false`, strings that are empty or only whitespace, empty arrays
/// and empty objects are blank. Every number is present, including `0`.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Bool(true) | Value::Number(_) => false,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Negation of [`is_blank`].
#[must_use]
pub fn is_present(value: &Value) -> bool {
    !is_blank(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null), true)]
    #[case(json!(false), true)]
    #[case(json!(""), true)]
    #[case(json!("  \t\n"), true)]
    #[case(json!([]), true)]
    #[case(json!({}), true)]
    #[case(json!(true), false)]
    #[case(json!(0), false)]
    #[case(json!("x"), false)]
    #[case(json!([null]), false)]
    #[case(json!({"a": 1}), false)]
    fn blankness(#[case] value: Value, #[case] blank: bool) {
        assert_eq!(is_blank(&value), blank, "for {value}");
        assert_eq!(is_present(&value), !blank);
    }
}
