//! # telephone-service
//!
//! Service objects: a declared set of arguments, a single action body and a
//! uniform call/result/success protocol around it.
//!
//! ## Lifecycle
//!
//! 1. **Resolve**: explicit values, then defaults in declaration order
//!    ([`resolve::resolve`]).
//! 2. **Check**: every required argument was supplied as a key
//!    ([`resolve::check_required`]). Failure here is a hard
//!    [`ServiceError`].
//! 3. **Validate**: declared rule sets plus [`Service::validate`]. Failures
//!    are collected on the instance, never returned as `Err`.
//! 4. **Perform**: only when validation passed; the output becomes the
//!    instance's result.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use telephone_service::prelude::*;
//!
//! struct Signup {
//!     arguments: ArgumentSet,
//! }
//!
//! impl Service for Signup {
//!     type Output = String;
//!
//!     fn arguments(&self) -> &ArgumentSet {
//!         &self.arguments
//!     }
//!
//!     fn perform(&self, ctx: &mut CallContext<'_>) -> String {
//!         let user = ctx.get_str("user").unwrap_or_default();
//!         let plan = ctx.get_str("plan").unwrap_or_default();
//!         format!("{user} on {plan}")
//!     }
//! }
//!
//! let signup = Signup {
//!     arguments: ArgumentSet::new()
//!         .argument(Argument::new("user").required())
//!         .argument(Argument::new("plan").default(json!("free"))),
//! };
//!
//! let instance = signup.call(Attributes::new().with("user", "ada")).unwrap();
//! assert!(instance.success());
//! assert_eq!(instance.result().unwrap(), "ada on free");
//! ```

mod argument;
mod attributes;
mod error;
mod instance;
mod service;
mod set;

pub mod prelude;
pub mod resolve;

pub use argument::{Argument, ArgumentDefault, ComputeDefault};
pub use attributes::Attributes;
pub use error::ServiceError;
pub use instance::{CallState, Instance};
pub use service::{CallContext, Service, ServiceExt};
pub use set::ArgumentSet;
