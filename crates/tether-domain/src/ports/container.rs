//! Container Port
//!
//! The contract a container façade exposes to the resolution engine. Nested
//! parameter resolution re-enters [`ContainerInterface::make_in`] with the
//! caller's resolve stack so the whole outer call shares one trail.

use super::introspection::MetadataProvider;
use crate::error::Result;
use crate::value_objects::{Arguments, ResolveStack, Source, Value};

/// Container contract
pub trait ContainerInterface: Send + Sync {
    /// Metadata provider backing the container's definitions
    fn metadata(&self) -> &dyn MetadataProvider;

    /// Fresh resolve stack carrying the container's resolution policy
    fn new_stack(&self) -> ResolveStack {
        ResolveStack::new()
    }

    /// Build `id` within an ongoing resolution
    fn make_in(&self, stack: &mut ResolveStack, id: &str, arguments: Arguments) -> Result<Value>;

    /// Build `id` as an outer call (always a fresh value)
    fn make(&self, id: &str, arguments: Arguments) -> Result<Value> {
        let mut stack = self.new_stack();
        self.make_in(&mut stack, id, arguments)
    }

    /// Bind `id` to a source
    fn define(&self, id: &str, source: Source) -> Result<()>;

    /// Shared entry for `id`, built and cached on first use
    fn get(&self, id: &str) -> Result<Value>;

    /// Store a shared entry
    fn set(&self, id: &str, value: Value);

    /// True when `id` can be served
    fn has(&self, id: &str) -> bool;
}
