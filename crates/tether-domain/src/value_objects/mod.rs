//! Value Objects
//!
//! Immutable data that flows through resolution: produced values, caller
//! override maps, the positional argument list handed to factories, parsed
//! identifiers and the per-call resolve stack.

pub mod args;
pub mod arguments;
pub mod identifier;
pub mod stack;
pub mod value;

pub use args::Args;
pub use arguments::{ArgumentKey, Arguments};
pub use identifier::{Source, Target};
pub use stack::{ResolveStack, Trail};
pub use value::{Instance, Value};
