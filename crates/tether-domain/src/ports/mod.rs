//! Ports
//!
//! The two seams of the engine: the metadata introspection provider it
//! consumes and the container contract it re-enters for nested resolution.

pub mod container;
pub mod introspection;

pub use container::ContainerInterface;
pub use introspection::{
    ClassInfo, Closure, ConstructorInfo, FunctionInfo, MetadataProvider, MethodInfo,
    ParameterSpec, TypeRef, Visibility,
};
