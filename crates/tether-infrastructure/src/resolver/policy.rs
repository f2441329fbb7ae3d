//! Parameter resolution policy
//!
//! Decides the value of each parameter, first match wins:
//!
//! 1. an override at the parameter's position, used verbatim
//! 2. an override under the parameter's name, used verbatim
//! 3. no candidate class: null if allowed, else the default, else failure
//! 4. candidate classes: the `"$" + name` bucket picks a type branch when one
//!    of the candidates is a key in it; otherwise the first candidate is built
//!    with the whole bucket (or nothing) as its arguments

use tether_domain::error::{Error, Result};
use tether_domain::ports::ContainerInterface;
use tether_domain::value_objects::{Arguments, ResolveStack, Value};
use tracing::trace;

use super::parameter::Parameter;

/// Resolve a parameter list in declaration order
pub fn resolve_parameters(
    container: &dyn ContainerInterface,
    stack: &mut ResolveStack,
    parameters: &[Parameter],
    arguments: &Arguments,
) -> Result<Vec<Value>> {
    parameters
        .iter()
        .map(|parameter| resolve_parameter(container, stack, parameter, arguments))
        .collect()
}

/// Resolve one parameter
pub fn resolve_parameter(
    container: &dyn ContainerInterface,
    stack: &mut ResolveStack,
    parameter: &Parameter,
    arguments: &Arguments,
) -> Result<Value> {
    if let Some(value) = arguments.position(parameter.position()) {
        trace!(parameter = parameter.name(), "positional override");
        return Ok(value.clone());
    }

    if let Some(value) = arguments.name(parameter.name()) {
        trace!(parameter = parameter.name(), "named override");
        return Ok(value.clone());
    }

    let Some(first) = parameter.classes().first() else {
        return scalar_value(stack, parameter);
    };

    let bucket = match arguments.bucket_for(parameter.name()) {
        None => None,
        Some(Value::Arguments(bucket)) => Some(bucket),
        Some(other) => {
            return Err(Error::resolved(
                format!(
                    "Parameter[{}] of {}: override bucket must be an argument map, found {}",
                    parameter.name(),
                    parameter.call_name(),
                    other.kind()
                ),
                stack.trail(),
            ));
        }
    };

    if let Some(bucket) = bucket {
        for class in parameter.classes() {
            match bucket.name(class) {
                Some(Value::Arguments(branch)) => {
                    trace!(parameter = parameter.name(), class = %class, "bucket branch");
                    return container.make_in(stack, class, branch.clone());
                }
                Some(other) => {
                    return Err(Error::resolved(
                        format!(
                            "Parameter[{}] of {}: arguments for {class} must be an argument map, found {}",
                            parameter.name(),
                            parameter.call_name(),
                            other.kind()
                        ),
                        stack.trail(),
                    ));
                }
                None => {}
            }
        }
    }

    trace!(parameter = parameter.name(), class = %first, "first candidate");
    let arguments = bucket.cloned().unwrap_or_default();
    container.make_in(stack, first, arguments)
}

fn scalar_value(stack: &ResolveStack, parameter: &Parameter) -> Result<Value> {
    if parameter.allows_null() {
        return Ok(Value::Null);
    }

    if let Some(default) = parameter.default_value() {
        return Ok(default.clone());
    }

    Err(Error::resolved(
        format!(
            "Parameter[{}] of {} has no value provided",
            parameter.name(),
            parameter.call_name()
        ),
        stack.trail(),
    ))
}
