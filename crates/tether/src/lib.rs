//! # Tether
//!
//! An inversion-of-control container. Given an identifier naming a class, a
//! free function, a `"Type::method"` pair or an inline closure, it works out
//! the unit's declared parameters, fills the ones the caller did not supply
//! by resolving their types through the same container, and returns the
//! constructed object or the call result.
//!
//! Rust has no runtime reflection, so constructible units are declared up
//! front in a [`SignatureTable`](infrastructure::SignatureTable), directly or
//! through modules registered at compile time.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tether::prelude::*;
//!
//! struct Greeter { name: String }
//!
//! let mut builder = SignatureTable::builder();
//! builder.class(ClassInfo::new("Greeter").constructor(
//!     vec![ParameterSpec::new("name").typed("string").default_value("world")],
//!     |args| Ok(Greeter { name: args.str(0)?.to_string() }),
//! ));
//!
//! let container = Container::new(Arc::new(builder.build()));
//! let ada = container.make("Greeter", Arguments::new().at(0, "Ada"))?;
//! assert_eq!(ada.downcast::<Greeter>().unwrap().name, "Ada");
//! ```
//!
//! ## Architecture
//!
//! - `domain` - values, override maps, identifiers, errors and ports
//! - `infrastructure` - signatures, definitions, resolvers, container, config and logging

/// Domain layer - values, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use tether_domain::*;
}

/// Infrastructure layer - resolution engine, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use tether_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the container at the crate root
pub use infrastructure::Container;

/// Everything needed to declare signatures and resolve identifiers
pub mod prelude {
    pub use tether_domain::ports::{
        ClassInfo, Closure, ContainerInterface, FunctionInfo, MetadataProvider, MethodInfo,
        ParameterSpec, Visibility,
    };
    pub use tether_domain::{Args, Arguments, Error, Instance, Result, Source, Value};
    pub use tether_infrastructure::config::{AppConfig, ConfigLoader, ContainerConfig};
    pub use tether_infrastructure::signature::{SignatureEntry, SignatureTableBuilder};
    pub use tether_infrastructure::{Container, SignatureTable};
}
