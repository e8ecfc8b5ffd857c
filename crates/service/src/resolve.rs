//! Argument resolution for a new instance.
//!
//! [`resolve`] turns the caller's explicit values into the full attribute set
//! and [`check_required`] enforces key presence for required arguments. Both
//! run at construction time, before any validation.

use crate::argument::ArgumentDefault;
use crate::attributes::Attributes;
use crate::error::ServiceError;
use crate::set::ArgumentSet;

/// Resolve the attributes of a new instance.
///
/// Explicit values are applied first, verbatim, including explicit `null`.
/// Then every argument that was not supplied gets its default in declaration
/// order: static defaults are cloned, computed defaults are invoked with
/// everything resolved so far, and arguments without a default stay unset.
///
/// A computed default that reads a later-declared, defaulted argument sees it
/// unset. Declarations are not reordered to satisfy such dependencies.
///
/// The returned attributes are in declaration order.
///
/// # Errors
///
/// Returns [`ServiceError::UnknownArgument`] for the first explicit key that
/// names no declared argument.
pub fn resolve(arguments: &ArgumentSet, explicit: &Attributes) -> Result<Attributes, ServiceError> {
    if let Some(name) = explicit.keys().find(|name| !arguments.contains(name)) {
        return Err(ServiceError::UnknownArgument {
            name: name.to_owned(),
        });
    }

    let mut resolved: Attributes = arguments
        .names()
        .filter_map(|name| explicit.get(name).map(|value| (name, value.clone())))
        .collect();

    for argument in arguments {
        let name = argument.name();
        if resolved.contains(name) {
            continue;
        }
        match argument.default_value() {
            ArgumentDefault::None => {}
            ArgumentDefault::Static(value) => resolved.set(name, value.clone()),
            ArgumentDefault::Computed(compute) => {
                let value = compute.compute(&resolved);
                tracing::trace!(argument = name, %value, "computed default");
                resolved.set(name, value);
            }
        }
    }

    Ok(order_by_declaration(arguments, resolved))
}

/// Verify every required argument was supplied as a key.
///
/// Only key presence in `explicit` counts: an explicit `null` satisfies the
/// check, and a default never does.
///
/// # Errors
///
/// Returns [`ServiceError::MissingArgument`] naming every missing argument in
/// declaration order.
pub fn check_required(arguments: &ArgumentSet, explicit: &Attributes) -> Result<(), ServiceError> {
    let names: Vec<String> = arguments
        .required_names()
        .filter(|name| !explicit.contains(name))
        .map(str::to_owned)
        .collect();

    if names.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::MissingArgument { names })
    }
}

fn order_by_declaration(arguments: &ArgumentSet, mut resolved: Attributes) -> Attributes {
    arguments
        .names()
        .filter_map(|name| resolved.remove(name).map(|value| (name, value)))
        .collect()
}
