//! Error types for validation failures
//!
//! Validation failures are data, not faults: a [`ValidationError`] describes
//! one broken rule on one field, and [`ValidationErrors`] is the ordered
//! collection whose emptiness decides whether a service call succeeded.
//!
//! String fields use `Cow<'static, str>` so the common case of static codes
//! and messages never allocates.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single failed validation rule.
///
/// # Examples
///
/// ```
/// use telephone_validator::ValidationError;
///
/// let error = ValidationError::too_short(3, 1).with_field("name");
/// assert_eq!(error.code, "too_short");
/// assert_eq!(error.param("count"), Some("3"));
/// assert_eq!(error.full_message(), "name is too short (minimum is 3 characters)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Machine-readable code, e.g. `blank`, `too_short`, `invalid`.
    pub code: Cow<'static, str>,

    /// Message relative to the field, e.g. `can't be blank`.
    pub message: Cow<'static, str>,

    /// The argument the error belongs to. `None` means the error applies to
    /// the service as a whole.
    pub field: Option<Cow<'static, str>>,

    /// Ordered template parameters (typically 0-2).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
        }
    }

    /// Sets the field this error belongs to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a template parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the message, keeping code, field and params.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// The message prefixed with the field name, if any.
    #[must_use]
    pub fn full_message(&self) -> String {
        match &self.field {
            Some(field) => format!("{field} {}", self.message),
            None => self.message.to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// The value is blank but must be present.
    pub fn blank() -> Self {
        Self::new("blank", "can't be blank")
    }

    /// The value is present but must be blank.
    pub fn present() -> Self {
        Self::new("present", "must be blank")
    }

    /// The value is shorter than `min`.
    pub fn too_short(min: usize, actual: usize) -> Self {
        Self::new(
            "too_short",
            format!("is too short (minimum is {min} characters)"),
        )
        .with_param("count", min.to_string())
        .with_param("actual", actual.to_string())
    }

    /// The value is longer than `max`.
    pub fn too_long(max: usize, actual: usize) -> Self {
        Self::new("too_long", format!("is too long (maximum is {max} characters)"))
            .with_param("count", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// The value length differs from the exact length `is`.
    pub fn wrong_length(is: usize, actual: usize) -> Self {
        Self::new(
            "wrong_length",
            format!("is the wrong length (should be {is} characters)"),
        )
        .with_param("count", is.to_string())
        .with_param("actual", actual.to_string())
    }

    /// The value does not match the required format.
    pub fn invalid() -> Self {
        Self::new("invalid", "is invalid")
    }

    /// The value is not one of the allowed values.
    pub fn inclusion() -> Self {
        Self::new("inclusion", "is not included in the list")
    }

    /// The value is one of the forbidden values.
    pub fn exclusion() -> Self {
        Self::new("exclusion", "is reserved")
    }

    /// The value is not numeric.
    pub fn not_a_number() -> Self {
        Self::new("not_a_number", "is not a number")
    }

    /// The value is numeric but not an integer.
    pub fn not_an_integer() -> Self {
        Self::new("not_an_integer", "must be an integer")
    }

    /// The value violates a numeric bound such as `greater_than`.
    pub fn out_of_bound(code: &'static str, relation: &'static str, bound: f64) -> Self {
        Self::new(code, format!("must be {relation} {bound}"))
            .with_param("count", bound.to_string())
    }
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// An ordered collection of validation errors.
///
/// Emptiness of this collection is what a service reports as success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the collection.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds multiple errors to the collection.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    /// Removes every error.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors in insertion order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Iterates over all errors.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Errors attached to `field`.
    pub fn on<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field.as_deref() == Some(field))
    }

    /// Whether any error is attached to `field`.
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.on(field).next().is_some()
    }

    /// Every error rendered as `"<field> <message>"`.
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(ValidationError::full_message).collect()
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
