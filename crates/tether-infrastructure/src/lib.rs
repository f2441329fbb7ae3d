//! # Infrastructure Layer
//!
//! The resolution engine and its ambient support.
//!
//! ## Module Categories
//!
//! ### Resolution
//! | Module | Description |
//! |--------|-------------|
//! | [`signature`] | Registration-time metadata provider and `linkme` module registry |
//! | [`definition`] | Definition variants and the memoizing registry |
//! | [`resolver`] | Resolvers, parameter policy and dispatcher |
//! | [`container`] | Container façade with the shared-entry cache |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration (TOML + environment) |
//! | [`constants`] | Infrastructure constants |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Error context helpers |

pub mod config;
pub mod constants;
pub mod container;
pub mod definition;
pub mod error_ext;
pub mod logging;
pub mod resolver;
pub mod signature;

// Re-export commonly used types
pub use container::Container;
pub use definition::{Definition, DefinitionKind, DefinitionRegistry};
pub use error_ext::ErrorContext;
pub use resolver::{Resolver, ResolverDispatcher};
pub use signature::{SignatureTable, SignatureTableBuilder};
