use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::blank::is_blank;
use crate::error::ValidationError;
use crate::traits::Validate;

/// A compiled regular expression that serializes as its source text.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile `pattern`.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }

    /// The source text of the expression.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether `haystack` contains a match.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::new(&source).map_err(serde::de::Error::custom)
    }
}

/// A declarative validation rule attached to an argument.
///
/// Rules validate a JSON value; an unset argument is validated as `null`.
/// Every variant accepts an optional `message` that replaces the default one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationRule {
    /// Value must not be blank (see [`is_blank`](crate::is_blank)).
    Presence {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Value must be blank.
    Absence {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Character count (strings) or element count (arrays, objects) bounds.
    Length {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// String form of the value must match the pattern.
    Format {
        pattern: Pattern,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Value must equal one of `values`.
    Inclusion {
        values: Vec<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Value must not equal any of `values`.
    Exclusion {
        values: Vec<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Value must be a number (or a numeric string) within the given bounds.
    Numericality {
        #[serde(default)]
        only_integer: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        greater_than: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        greater_than_or_equal_to: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        less_than: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        less_than_or_equal_to: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ValidationRule {
    #[must_use]
    pub fn presence() -> Self {
        Self::Presence { message: None }
    }

    #[must_use]
    pub fn absence() -> Self {
        Self::Absence { message: None }
    }

    /// Require at least `min` characters or elements.
    #[must_use]
    pub fn min_length(min: usize) -> Self {
        Self::length(Some(min), None)
    }

    /// Require at most `max` characters or elements.
    #[must_use]
    pub fn max_length(max: usize) -> Self {
        Self::length(None, Some(max))
    }

    /// Require an inclusive length range; either side may be open.
    #[must_use]
    pub fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Self::Length {
            min,
            max,
            is: None,
            message: None,
        }
    }

    /// Require exactly `is` characters or elements.
    #[must_use]
    pub fn exact_length(is: usize) -> Self {
        Self::Length {
            min: None,
            max: None,
            is: Some(is),
            message: None,
        }
    }

    /// Require the value to match `pattern`.
    pub fn format(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Format {
            pattern: Pattern::new(pattern)?,
            message: None,
        })
    }

    #[must_use]
    pub fn inclusion(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Inclusion {
            values: values.into_iter().collect(),
            message: None,
        }
    }

    #[must_use]
    pub fn exclusion(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Exclusion {
            values: values.into_iter().collect(),
            message: None,
        }
    }

    /// Require any number.
    #[must_use]
    pub fn numericality() -> Self {
        Self::Numericality {
            only_integer: false,
            greater_than: None,
            greater_than_or_equal_to: None,
            less_than: None,
            less_than_or_equal_to: None,
            message: None,
        }
    }

    /// Require an integer.
    #[must_use]
    pub fn integer() -> Self {
        Self::Numericality {
            only_integer: true,
            greater_than: None,
            greater_than_or_equal_to: None,
            less_than: None,
            less_than_or_equal_to: None,
            message: None,
        }
    }

    /// Require a number within `min..=max`.
    #[must_use]
    pub fn between(min: f64, max: f64) -> Self {
        Self::Numericality {
            only_integer: false,
            greater_than: None,
            greater_than_or_equal_to: Some(min),
            less_than: None,
            less_than_or_equal_to: Some(max),
            message: None,
        }
    }

    /// Replace the default failure message.
    #[must_use]
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        let slot = match &mut self {
            Self::Presence { message }
            | Self::Absence { message }
            | Self::Length { message, .. }
            | Self::Format { message, .. }
            | Self::Inclusion { message, .. }
            | Self::Exclusion { message, .. }
            | Self::Numericality { message, .. } => message,
        };
        *slot = Some(text.into());
        self
    }

    /// The custom message, if one was set.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Presence { message }
            | Self::Absence { message }
            | Self::Length { message, .. }
            | Self::Format { message, .. }
            | Self::Inclusion { message, .. }
            | Self::Exclusion { message, .. }
            | Self::Numericality { message, .. } => message.as_deref(),
        }
    }

    /// Short rule name, matching the serialized `rule` tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Presence { .. } => "presence",
            Self::Absence { .. } => "absence",
            Self::Length { .. } => "length",
            Self::Format { .. } => "format",
            Self::Inclusion { .. } => "inclusion",
            Self::Exclusion { .. } => "exclusion",
            Self::Numericality { .. } => "numericality",
        }
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match self {
            Self::Presence { .. } => {
                if is_blank(value) {
                    return Err(ValidationError::blank());
                }
            }
            Self::Absence { .. } => {
                if !is_blank(value) {
                    return Err(ValidationError::present());
                }
            }
            Self::Length { min, max, is, .. } => {
                let actual = length_of(value);
                if let Some(is) = *is
                    && actual != is
                {
                    return Err(ValidationError::wrong_length(is, actual));
                }
                if let Some(min) = *min
                    && actual < min
                {
                    return Err(ValidationError::too_short(min, actual));
                }
                if let Some(max) = *max
                    && actual > max
                {
                    return Err(ValidationError::too_long(max, actual));
                }
            }
            Self::Format { pattern, .. } => {
                let matched = text_of(value).is_some_and(|text| pattern.is_match(&text));
                if !matched {
                    return Err(ValidationError::invalid()
                        .with_param("pattern", pattern.as_str().to_owned()));
                }
            }
            Self::Inclusion { values, .. } => {
                if !values.contains(value) {
                    return Err(ValidationError::inclusion());
                }
            }
            Self::Exclusion { values, .. } => {
                if values.contains(value) {
                    return Err(ValidationError::exclusion());
                }
            }
            Self::Numericality {
                only_integer,
                greater_than,
                greater_than_or_equal_to,
                less_than,
                less_than_or_equal_to,
                ..
            } => {
                let Some(number) = number_of(value) else {
                    return Err(ValidationError::not_a_number());
                };
                if *only_integer && !is_integer(value) {
                    return Err(ValidationError::not_an_integer());
                }
                let bounds: [NumericBound; 4] = [
                    (*greater_than, "greater_than", "greater than", |n, b| n > b),
                    (
                        *greater_than_or_equal_to,
                        "greater_than_or_equal_to",
                        "greater than or equal to",
                        |n, b| n >= b,
                    ),
                    (*less_than, "less_than", "less than", |n, b| n < b),
                    (
                        *less_than_or_equal_to,
                        "less_than_or_equal_to",
                        "less than or equal to",
                        |n, b| n <= b,
                    ),
                ];
                for (bound, code, relation, holds) in bounds {
                    if let Some(bound) = bound
                        && !holds(number, bound)
                    {
                        return Err(ValidationError::out_of_bound(code, relation, bound));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Validate for ValidationRule {
    type Input = Value;

    fn validate(&self, input: &Value) -> Result<(), ValidationError> {
        self.check(input).map_err(|error| match self.message() {
            Some(message) => error.with_message(message.to_owned()),
            None => error,
        })
    }
}

/// `(bound, error code, relation in the message, predicate)`
type NumericBound = (Option<f64>, &'static str, &'static str, fn(f64, f64) -> bool);

fn length_of(value: &Value) -> usize {
    match value {
        Value::Null => 0,
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        other => other.to_string().chars().count(),
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}
