//! Prelude module for convenient imports.
//!
//! Brings in the service traits, the declaration types and the validation
//! types a service body usually needs.

pub use crate::{
    Argument, ArgumentSet, Attributes, CallContext, CallState, Instance, Service, ServiceError,
    ServiceExt,
};
pub use telephone_validator::{RuleSet, ValidationError, ValidationErrors, ValidationRule};
