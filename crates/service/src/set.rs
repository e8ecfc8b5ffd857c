use indexmap::IndexMap;
use telephone_validator::ValidationErrors;

use crate::argument::{Argument, ArgumentDefault};
use crate::attributes::Attributes;

/// The ordered declaration table of a service.
///
/// Built once per service type and read-only afterwards. Declaring a name
/// twice replaces the earlier declaration in its original position, so a
/// child table can override an inherited argument without reordering it.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use telephone_service::{Argument, ArgumentSet};
///
/// let base = ArgumentSet::new()
///     .argument(Argument::new("user").required())
///     .argument(Argument::new("locale").default(json!("en")));
///
/// let child = ArgumentSet::inherit(&base)
///     .argument(Argument::new("locale").default(json!("fr")))
///     .argument(Argument::new("notify").default(json!(true)));
///
/// assert_eq!(child.names().collect::<Vec<_>>(), vec!["user", "locale", "notify"]);
/// assert_eq!(base.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArgumentSet {
    arguments: IndexMap<String, Argument>,
}

impl ArgumentSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a table from a copy of `parent`'s declarations.
    #[must_use]
    pub fn inherit(parent: &Self) -> Self {
        parent.clone()
    }

    /// Declare an argument.
    #[must_use]
    pub fn argument(mut self, argument: Argument) -> Self {
        self.push(argument);
        self
    }

    /// Declare an argument in place.
    pub fn push(&mut self, argument: Argument) {
        self.arguments.insert(argument.name().to_owned(), argument);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.arguments.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.values()
    }

    /// Declared names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arguments.keys().map(String::as_str)
    }

    /// Names of required arguments in declaration order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|a| a.is_required()).map(Argument::name)
    }

    /// One default entry per argument, in declaration order.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &ArgumentDefault)> {
        self.iter().map(|a| (a.name(), a.default_value()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Run every argument's effective rules against `attributes`.
    pub fn validate(&self, attributes: &Attributes, errors: &mut ValidationErrors) {
        for argument in self.iter() {
            if let Some(rules) = argument.rules() {
                rules.validate_field(argument.name(), attributes.get(argument.name()), errors);
            }
        }
    }
}

impl<'a> IntoIterator for &'a ArgumentSet {
    type Item = &'a Argument;
    type IntoIter = indexmap::map::Values<'a, String, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.arguments.values()
    }
}

impl FromIterator<Argument> for ArgumentSet {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        let mut set = Self::new();
        for argument in iter {
            set.push(argument);
        }
        set
    }
}
