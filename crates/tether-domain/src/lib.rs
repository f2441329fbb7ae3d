//! # Domain Layer
//!
//! Core types of the Tether resolution engine. Nothing in this crate knows how
//! definitions are built or invoked; it only describes what flows between the
//! engine and its collaborators.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Reserved override keys and separators |
//! | [`error`] | Layered error taxonomy (defined / not found / resolved) |
//! | [`value_objects`] | Values, override maps, identifiers, resolve stack |
//! | [`ports`] | Metadata introspection and container contracts |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, ReflectedCode, Result};
pub use ports::{ContainerInterface, MetadataProvider};
pub use value_objects::{
    Args, ArgumentKey, Arguments, Instance, ResolveStack, Source, Target, Trail, Value,
};
