//! Core traits for the validation system

use crate::error::ValidationError;

/// The core trait that every validator implements.
///
/// Generic over its input so rule types can validate JSON values while
/// hand-written validators stay free to validate anything else.
///
/// # Examples
///
/// ```
/// use telephone_validator::{Validate, ValidationError};
///
/// struct NonZero;
///
/// impl Validate for NonZero {
///     type Input = i64;
///
///     fn validate(&self, input: &i64) -> Result<(), ValidationError> {
///         if *input == 0 {
///             Err(ValidationError::new("zero", "must not be zero"))
///         } else {
///             Ok(())
///         }
///     }
/// }
///
/// assert!(NonZero.validate(&3).is_ok());
/// assert!(NonZero.validate(&0).is_err());
/// ```
pub trait Validate {
    /// The type of input being validated.
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Whether `input` passes.
    fn is_valid(&self, input: &Self::Input) -> bool {
        self.validate(input).is_ok()
    }
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}
