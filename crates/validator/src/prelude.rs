//! Prelude module for convenient imports.
//!
//! `use telephone_validator::prelude::*;` brings in the trait, the error
//! types and the rule types.

pub use crate::{RuleSet, Validate, ValidationError, ValidationErrors, ValidationRule, is_blank};
