use serde_json::Value;
use telephone_validator::{ValidationError, ValidationErrors};

use crate::attributes::Attributes;
use crate::error::ServiceError;
use crate::instance::Instance;
use crate::resolve::{check_required, resolve};
use crate::set::ArgumentSet;

/// A service object: declared arguments plus an action body.
///
/// Implementors supply the declaration table and [`perform`](Self::perform).
/// Building, validating and calling are provided by [`ServiceExt`] and
/// [`Instance`] and cannot be overridden.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use telephone_service::prelude::*;
///
/// struct Greet {
///     arguments: ArgumentSet,
/// }
///
/// impl Service for Greet {
///     type Output = String;
///
///     fn arguments(&self) -> &ArgumentSet {
///         &self.arguments
///     }
///
///     fn perform(&self, ctx: &mut CallContext<'_>) -> String {
///         format!("Hello, {}!", ctx.get_str("name").unwrap_or("stranger"))
///     }
/// }
///
/// let greet = Greet {
///     arguments: ArgumentSet::new().argument(Argument::new("name").required()),
/// };
///
/// let done = greet.call(Attributes::new().with("name", "Ada")).unwrap();
/// assert!(done.success());
/// assert_eq!(done.result().map(String::as_str), Some("Hello, Ada!"));
///
/// let blank = greet.call(Attributes::new().with("name", "")).unwrap();
/// assert!(!blank.success());
/// assert!(blank.result().is_none());
///
/// assert!(greet.call(Attributes::new()).is_err());
/// ```
pub trait Service {
    /// The value produced by the action, stored as the instance's result.
    type Output;

    /// The declaration table, built once and shared by every instance.
    fn arguments(&self) -> &ArgumentSet;

    /// The action body. Runs only after validation passed.
    fn perform(&self, ctx: &mut CallContext<'_>) -> Self::Output;

    /// Extra validation across arguments, run after the declared rules.
    fn validate(&self, _attributes: &Attributes, _errors: &mut ValidationErrors) {}

    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Construction and invocation for every [`Service`].
pub trait ServiceExt: Service + Sized {
    /// Resolve arguments and check required keys.
    ///
    /// # Errors
    ///
    /// [`ServiceError::UnknownArgument`] for an undeclared key,
    /// [`ServiceError::MissingArgument`] when required keys are absent.
    fn build(&self, args: Attributes) -> Result<Instance<'_, Self>, ServiceError> {
        let span = tracing::debug_span!("service.build", service = self.name());
        let _guard = span.enter();

        let arguments = self.arguments();
        let attributes = resolve(arguments, &args)?;
        check_required(arguments, &args).inspect_err(|err| {
            tracing::debug!(error = %err, "required arguments missing");
        })?;

        tracing::debug!(arguments = attributes.len(), "instance built");
        Ok(Instance::new(self, attributes))
    }

    /// Build an instance and call it. Returns the instance, never the raw
    /// result; a failed validation is reported through
    /// [`Instance::success`] rather than as an error.
    fn call(&self, args: Attributes) -> Result<Instance<'_, Self>, ServiceError> {
        Ok(self.build(args)?.call())
    }
}

impl<S: Service> ServiceExt for S {}

/// What the action body sees while it runs.
///
/// Attributes are read-only here. Errors added through
/// [`add_error`](Self::add_error) make the call unsuccessful while the
/// action's result is still stored.
#[derive(Debug)]
pub struct CallContext<'a> {
    attributes: &'a Attributes,
    errors: &'a mut ValidationErrors,
}

impl<'a> CallContext<'a> {
    pub(crate) fn new(attributes: &'a Attributes, errors: &'a mut ValidationErrors) -> Self {
        Self { attributes, errors }
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        self.attributes
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.attributes.get_str(name)
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.add(error);
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        self.errors
    }
}
