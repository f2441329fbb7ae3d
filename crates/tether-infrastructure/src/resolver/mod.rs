//! Dependency Resolution Engine
//!
//! A [`Resolver`] is bound to one definition and turns caller overrides into a
//! value: it resolves the declared parameters (re-entering the container for
//! class-typed ones) and performs the construction or call.
//!
//! ```text
//! Container::make(id) → DefinitionRegistry → ResolverDispatcher
//!                                                  │
//!                                     Resolver::action(overrides)
//!                                                  │
//!                          policy::resolve_parameters ──→ Container::make_in
//! ```

pub mod dispatch;
pub mod parameter;
pub mod policy;

use std::sync::Arc;

use tether_domain::constants::CONSTRUCTOR_MEMBER;
use tether_domain::error::{Error, Result};
use tether_domain::ports::{ClassInfo, Closure, ContainerInterface, FunctionInfo, MethodInfo};
use tether_domain::value_objects::identifier::method_name;
use tether_domain::value_objects::{Args, Arguments, Instance, ResolveStack, Value};
use tracing::debug;

pub use dispatch::ResolverDispatcher;
pub use parameter::{Parameter, ParameterCache, Parameters};
pub use policy::{resolve_parameter, resolve_parameters};

/// Bound executor for one definition
#[derive(Debug, Clone)]
pub enum Resolver {
    /// Instantiates a class
    Class {
        /// Class metadata
        info: Arc<ClassInfo>,
        /// Constructor parameters, absent when no constructor is declared
        parameters: Option<Parameters>,
    },
    /// Calls a free function
    Function {
        /// Function metadata
        info: Arc<FunctionInfo>,
        /// Function parameters
        parameters: Parameters,
    },
    /// Calls a method, building the receiver first when needed
    Method {
        /// Method metadata (declaring class included)
        info: Arc<MethodInfo>,
        /// Class named by the identifier; receivers are built as this class
        class: String,
        /// Method parameters
        parameters: Parameters,
    },
    /// Calls an inline closure
    Closure {
        /// The closure
        closure: Closure,
        /// Closure parameters
        parameters: Parameters,
    },
}

impl Resolver {
    /// Resolve parameters against `arguments` and produce the value
    pub fn action(
        &self,
        container: &dyn ContainerInterface,
        stack: &mut ResolveStack,
        arguments: &Arguments,
    ) -> Result<Value> {
        match self {
            Self::Class { info, parameters } => {
                instantiate(container, stack, info, parameters.as_deref(), arguments)
            }
            Self::Function { info, parameters } => {
                let values = resolve_parameters(container, stack, parameters, arguments)?;
                (info.body)(Args::new(info.name.clone(), values))
                    .map_err(|e| e.with_trail(stack.trail()))
            }
            Self::Method {
                info,
                class,
                parameters,
            } => invoke_method(container, stack, info, class, parameters, arguments),
            Self::Closure {
                closure,
                parameters,
            } => {
                let values = resolve_parameters(container, stack, parameters, arguments)?;
                (closure.body)(Args::new(parameter::CLOSURE_CALL_NAME, values))
                    .map_err(|e| e.with_trail(stack.trail()))
            }
        }
    }
}

fn instantiate(
    container: &dyn ContainerInterface,
    stack: &mut ResolveStack,
    info: &ClassInfo,
    parameters: Option<&[Parameter]>,
    arguments: &Arguments,
) -> Result<Value> {
    if info.is_abstract {
        return Err(Error::resolved(
            format!("Class[{}] is abstract and cannot be instantiated", info.name),
            stack.trail(),
        ));
    }

    let object = match (&info.constructor, parameters) {
        (Some(constructor), Some(parameters)) => {
            if !info.is_instantiable() {
                return Err(Error::resolved(
                    format!("Class[{}] constructor is not public", info.name),
                    stack.trail(),
                ));
            }
            let values = resolve_parameters(container, stack, parameters, arguments)?;
            let call_name = method_name(&info.name, CONSTRUCTOR_MEMBER);
            (constructor.factory)(Args::new(call_name, values))
                .map_err(|e| e.with_trail(stack.trail()))?
        }
        _ => match &info.blank {
            Some(blank) => blank().map_err(|e| e.with_trail(stack.trail()))?,
            None => {
                return Err(Error::resolved(
                    format!(
                        "Class[{}] is an internal class that cannot be instantiated without invoking the constructor",
                        info.name
                    ),
                    stack.trail(),
                ));
            }
        },
    };

    debug!(class = %info.name, "instantiated");
    Ok(Value::Object(Instance::from_any(info.name.as_str(), object)))
}

fn invoke_method(
    container: &dyn ContainerInterface,
    stack: &mut ResolveStack,
    info: &MethodInfo,
    class: &str,
    parameters: &[Parameter],
    arguments: &Arguments,
) -> Result<Value> {
    let call_name = method_name(&info.class, &info.name);
    let body = match &info.body {
        Some(body) if info.is_public() && !info.is_abstract => body,
        _ => {
            return Err(Error::resolved(
                format!("Method[{call_name}] invocation failed"),
                stack.trail(),
            ));
        }
    };

    let receiver = if info.is_static {
        None
    } else {
        Some(receiver(container, stack, info, class, &call_name, arguments)?)
    };

    let values = resolve_parameters(container, stack, parameters, arguments)?;
    body(receiver.as_ref(), Args::new(call_name, values)).map_err(|e| e.with_trail(stack.trail()))
}

fn receiver(
    container: &dyn ContainerInterface,
    stack: &mut ResolveStack,
    info: &MethodInfo,
    class: &str,
    call_name: &str,
    arguments: &Arguments,
) -> Result<Instance> {
    let construction = match arguments.object() {
        Some(Value::Object(instance)) if container.metadata().is_a(instance.class(), &info.class) => {
            return Ok(instance.clone());
        }
        Some(Value::Arguments(construction)) => construction.clone(),
        None => Arguments::new(),
        Some(other) => {
            return Err(Error::resolved(
                format!(
                    "Method[{call_name}] construction parameter invalid: expected {} or an argument map, found {}",
                    info.class,
                    match other {
                        Value::Object(instance) => instance.class(),
                        value => value.kind(),
                    }
                ),
                stack.trail(),
            ));
        }
    };

    match container.make_in(stack, class, construction) {
        Ok(Value::Object(instance)) => Ok(instance),
        Ok(other) => Err(Error::resolved(
            format!(
                "Method[{call_name}] receiver {class} resolved to {} instead of an object",
                other.kind()
            ),
            stack.trail(),
        )),
        Err(e) => Err(Error::resolved_with_source(
            format!("Method[{call_name}] can't be instantiated"),
            stack.trail(),
            e,
        )),
    }
}
