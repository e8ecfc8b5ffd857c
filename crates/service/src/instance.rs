use std::fmt;

use serde_json::Value;
use telephone_validator::ValidationErrors;

use crate::attributes::Attributes;
use crate::error::ServiceError;
use crate::service::{CallContext, Service};

/// Where an instance is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    /// Arguments resolved, not yet called.
    Constructed,
    /// Validation failed on the last call; the action was skipped.
    Invalid,
    /// The action ran on the last call.
    Performed,
}

/// A built service object: resolved attributes, errors and result.
pub struct Instance<'s, S: Service> {
    service: &'s S,
    attributes: Attributes,
    errors: ValidationErrors,
    result: Option<S::Output>,
    state: CallState,
}

impl<'s, S: Service> Instance<'s, S> {
    pub(crate) fn new(service: &'s S, attributes: Attributes) -> Self {
        Self {
            service,
            attributes,
            errors: ValidationErrors::new(),
            result: None,
            state: CallState::Constructed,
        }
    }

    /// Refill the errors from the declared rules and the service's own
    /// `validate` hook. Returns whether no rule failed.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        self.service
            .arguments()
            .validate(&self.attributes, &mut self.errors);
        self.service.validate(&self.attributes, &mut self.errors);
        self.errors.is_empty()
    }

    /// Validate, then run the action once if valid and store its output.
    ///
    /// When validation fails the action is skipped and the result is cleared.
    #[must_use]
    pub fn call(mut self) -> Self {
        let span = tracing::debug_span!("service.call", service = self.service.name());
        let _guard = span.enter();

        if self.validate() {
            let mut ctx = CallContext::new(&self.attributes, &mut self.errors);
            self.result = Some(self.service.perform(&mut ctx));
            self.state = CallState::Performed;
            tracing::debug!(errors = self.errors.len(), "action performed");
        } else {
            self.result = None;
            self.state = CallState::Invalid;
            tracing::debug!(errors = self.errors.len(), "validation failed, action skipped");
        }
        self
    }

    /// Whether the errors collection is empty right now.
    ///
    /// Not cached, and not re-validated: after [`set`](Self::set) the answer
    /// reflects the last validation until [`validate`](Self::validate) or
    /// [`call`](Self::call) runs again.
    #[must_use]
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn result(&self) -> Option<&S::Output> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn into_result(self) -> Option<S::Output> {
        self.result
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[must_use]
    pub fn state(&self) -> CallState {
        self.state
    }

    #[must_use]
    pub fn service(&self) -> &'s S {
        self.service
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Overwrite a declared argument's value.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UnknownArgument`] if `name` is not declared.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ServiceError> {
        if !self.service.arguments().contains(name) {
            return Err(ServiceError::UnknownArgument {
                name: name.to_owned(),
            });
        }
        self.attributes.set(name, value);
        Ok(())
    }
}

impl<S> fmt::Debug for Instance<'_, S>
where
    S: Service,
    S::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("service", &self.service.name())
            .field("attributes", &self.attributes)
            .field("errors", &self.errors)
            .field("result", &self.result)
            .field("state", &self.state)
            .finish()
    }
}
