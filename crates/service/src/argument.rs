use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use telephone_validator::RuleSet;

use crate::attributes::Attributes;

/// A deferred default, evaluated fresh each time an instance is built.
///
/// `resolved` holds every attribute resolved so far: all explicit values
/// plus the defaults of arguments declared earlier. Defaults of later
/// arguments are not visible yet.
///
/// Closures of the shape `Fn(&Attributes) -> Value` implement this trait;
/// any other type may implement it directly.
pub trait ComputeDefault: Send + Sync {
    fn compute(&self, resolved: &Attributes) -> Value;
}

impl<F> ComputeDefault for F
where
    F: Fn(&Attributes) -> Value + Send + Sync,
{
    fn compute(&self, resolved: &Attributes) -> Value {
        self(resolved)
    }
}

/// The declared default of an argument.
///
/// `None` leaves the argument unset, which is different from
/// `Static(Value::Null)`.
#[derive(Clone, Default)]
pub enum ArgumentDefault {
    #[default]
    None,
    Static(Value),
    Computed(Arc<dyn ComputeDefault>),
}

impl ArgumentDefault {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }
}

impl fmt::Debug for ArgumentDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// One declared argument of a service.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use telephone_service::Argument;
///
/// let user = Argument::new("user").required();
/// assert!(user.is_required());
/// assert!(user.rules().is_some_and(|rules| rules.has_presence()));
///
/// let greeting = Argument::new("greeting").default(json!("hello"));
/// assert!(greeting.rules().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Argument {
    name: String,
    default: ArgumentDefault,
    required: bool,
    validates: Option<RuleSet>,
}

impl Argument {
    /// An optional argument with no default and no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: ArgumentDefault::None,
            required: false,
            validates: None,
        }
    }

    /// The caller must supply this argument's key.
    ///
    /// Without [`validates`](Self::validates), this also adds a presence rule.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Static default, cloned into every instance.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = ArgumentDefault::Static(value.into());
        self
    }

    /// Computed default from a closure.
    #[must_use]
    pub fn default_with<F>(self, compute: F) -> Self
    where
        F: Fn(&Attributes) -> Value + Send + Sync + 'static,
    {
        self.default_from(compute)
    }

    /// Computed default from any [`ComputeDefault`] implementation.
    #[must_use]
    pub fn default_from(mut self, compute: impl ComputeDefault + 'static) -> Self {
        self.default = ArgumentDefault::Computed(Arc::new(compute));
        self
    }

    /// Custom rule set. Takes precedence over the presence rule implied by
    /// [`required`](Self::required).
    #[must_use]
    pub fn validates(mut self, rules: impl Into<RuleSet>) -> Self {
        self.validates = Some(rules.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn default_value(&self) -> &ArgumentDefault {
        &self.default
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The rule set as declared, without the implied presence rule.
    #[must_use]
    pub fn declared_rules(&self) -> Option<&RuleSet> {
        self.validates.as_ref()
    }

    /// The rules that actually run for this argument.
    #[must_use]
    pub fn rules(&self) -> Option<Cow<'_, RuleSet>> {
        match (&self.validates, self.required) {
            (Some(rules), _) => Some(Cow::Borrowed(rules)),
            (None, true) => Some(Cow::Owned(RuleSet::presence())),
            (None, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use telephone_validator::ValidationRule;

    #[test]
    fn defaults_are_distinct_from_null() {
        assert!(Argument::new("a").default_value().is_none());

        let arg = Argument::new("a").default(Value::Null);
        assert!(!arg.default_value().is_none());
        assert!(!arg.default_value().is_computed());
        assert!(matches!(arg.default_value(), ArgumentDefault::Static(Value::Null)));
    }

    #[test]
    fn closures_compute_from_resolved() {
        let arg = Argument::new("greeting").default_with(|attrs: &Attributes| {
            json!(format!("Hello, {}!", attrs.get_str("name").unwrap_or("nobody")))
        });

        assert!(arg.default_value().is_computed());
        let ArgumentDefault::Computed(compute) = arg.default_value() else {
            panic!("expected computed default");
        };
        let attrs = Attributes::new().with("name", "Jane");
        assert_eq!(compute.compute(&attrs), json!("Hello, Jane!"));
        assert_eq!(compute.compute(&Attributes::new()), json!("Hello, nobody!"));
    }

    #[test]
    fn required_without_rules_implies_presence() {
        let arg = Argument::new("user").required();
        let rules = arg.rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules.has_presence());
        assert!(arg.declared_rules().is_none());
    }

    #[test]
    fn custom_rules_take_precedence() {
        let arg = Argument::new("email")
            .required()
            .validates(ValidationRule::format("@").unwrap());

        let rules = arg.rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert!(!rules.has_presence());
        assert!(matches!(rules, Cow::Borrowed(_)));
    }

    #[test]
    fn debug_hides_computation() {
        let arg = Argument::new("n").default_with(|_: &Attributes| json!(1));
        assert!(format!("{arg:?}").contains("Computed(..)"));
    }
}
