//! # telephone-validator
//!
//! Declarative validation rules for service arguments.
//!
//! A service argument may carry a [`RuleSet`] (its `validates:` option). After
//! arguments are resolved, each set validates its argument's value and
//! appends failures to a [`ValidationErrors`] collection. The collection is
//! data: a failed rule never aborts the caller, it only makes the call
//! unsuccessful.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use telephone_validator::prelude::*;
//!
//! let email = RuleSet::new()
//!     .rule(ValidationRule::presence())
//!     .rule(ValidationRule::format("@").unwrap());
//!
//! let mut errors = ValidationErrors::new();
//! email.validate_field("email", Some(&json!("nobody")), &mut errors);
//! assert_eq!(errors.full_messages(), vec!["email is invalid"]);
//! ```
//!
//! ## Rules
//!
//! - **Presence / Absence**: blankness per [`is_blank`]
//! - **Length**: `min`, `max`, exact `is`
//! - **Format**: regular expression on the value's string form
//! - **Inclusion / Exclusion**: membership in a list of JSON values
//! - **Numericality**: numbers or numeric strings, optional integer-only and bounds

mod blank;
mod error;
mod rule_set;
mod rules;
mod traits;

pub mod prelude;

pub use blank::{is_blank, is_present};
pub use error::{ValidationError, ValidationErrors};
pub use rule_set::RuleSet;
pub use rules::{Pattern, ValidationRule};
pub use traits::Validate;
