use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationErrors;
use crate::rules::ValidationRule;
use crate::traits::Validate;

/// The rules declared for one argument (its `validates:` option).
///
/// Every rule runs and every failure is reported; rules do not short-circuit
/// each other. With `allow_nil` set, a `null` or unset value skips the whole
/// set.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use telephone_validator::{RuleSet, ValidationErrors, ValidationRule};
///
/// let rules = RuleSet::new()
///     .rule(ValidationRule::presence())
///     .rule(ValidationRule::min_length(3));
///
/// let mut errors = ValidationErrors::new();
/// rules.validate_field("name", Some(&json!("")), &mut errors);
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    rules: Vec<ValidationRule>,

    #[serde(default)]
    allow_nil: bool,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The set implied by `required: true` when no explicit rules are declared.
    #[must_use]
    pub fn presence() -> Self {
        Self::new().rule(ValidationRule::presence())
    }

    /// Append a rule.
    #[must_use]
    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Skip every rule when the value is `null` or unset.
    #[must_use]
    pub fn allow_nil(mut self) -> Self {
        self.allow_nil = true;
        self
    }

    #[must_use]
    pub fn allows_nil(&self) -> bool {
        self.allow_nil
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationRule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether the set contains a presence rule.
    #[must_use]
    pub fn has_presence(&self) -> bool {
        self.rules
            .iter()
            .any(|r| matches!(r, ValidationRule::Presence { .. }))
    }

    /// Run every rule against `value` and record failures under `field`.
    ///
    /// `None` means the argument is unset and is validated as `null`.
    pub fn validate_field(
        &self,
        field: &str,
        value: Option<&Value>,
        errors: &mut ValidationErrors,
    ) {
        let value = value.unwrap_or(&Value::Null);
        if self.allow_nil && value.is_null() {
            return;
        }

        for rule in &self.rules {
            if let Err(error) = rule.validate(value) {
                errors.add(error.with_field(field.to_owned()));
            }
        }
    }
}

impl From<ValidationRule> for RuleSet {
    fn from(rule: ValidationRule) -> Self {
        Self::new().rule(rule)
    }
}

impl FromIterator<ValidationRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = ValidationRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
            allow_nil: false,
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a ValidationRule;
    type IntoIter = std::slice::Iter<'a, ValidationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
