//! Definition Registry
//!
//! Normalizes identifiers and sources into [`Definition`]s and memoizes the
//! named ones, so a given name maps to the same definition for the lifetime
//! of the registry. Closures are never cached.

use std::sync::Arc;

use dashmap::DashMap;
use tether_domain::error::{Error, Result};
use tether_domain::ports::{Closure, MetadataProvider};
use tether_domain::value_objects::identifier::method_name;
use tether_domain::value_objects::{Source, Target};
use tracing::debug;

use super::{ClassDefinition, ClosureDefinition, Definition, FunctionDefinition, MethodDefinition};

/// Append-only definition cache over a metadata provider
pub struct DefinitionRegistry {
    provider: Arc<dyn MetadataProvider>,
    classes: DashMap<String, Arc<Definition>>,
    functions: DashMap<String, Arc<Definition>>,
    methods: DashMap<String, Arc<Definition>>,
}

impl DefinitionRegistry {
    /// Empty registry over `provider`
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            classes: DashMap::new(),
            functions: DashMap::new(),
            methods: DashMap::new(),
        }
    }

    /// Metadata provider backing the registry
    pub fn provider(&self) -> &Arc<dyn MetadataProvider> {
        &self.provider
    }

    /// Definition for a source
    ///
    /// # Errors
    ///
    /// Returns a Defined-kind error when the target does not exist.
    pub fn make(&self, source: &Source) -> Result<Arc<Definition>> {
        let built = match source {
            Source::Name(identifier) => self.get(identifier),
            Source::Method { class, method } => self.method(class, method),
            Source::Bound { instance, method } => self.method(instance.class(), method),
            Source::Closure(closure) => Ok(self.closure(closure.clone())),
        };
        built.map_err(|e| match e {
            Error::Reflected { .. } => {
                Error::defined_with_source(source.describe(), "target does not exist", e)
            }
            other => other,
        })
    }

    /// Like [`make`](Self::make), but absent on failure or when the definition
    /// is not resolvable
    pub fn make_safely(&self, source: &Source) -> Option<Arc<Definition>> {
        match self.make(source) {
            Ok(definition) if definition.is_resolvable() => Some(definition),
            Ok(definition) => {
                debug!(source = %source.describe(), ?definition, "definition is not resolvable");
                None
            }
            Err(e) => {
                debug!(source = %source.describe(), error = %e, "definition failed");
                None
            }
        }
    }

    /// Definition for identifier text
    ///
    /// `"Type::member"` is a method, a bare name is a function when the
    /// provider knows one under it and a class otherwise.
    pub fn get(&self, identifier: &str) -> Result<Arc<Definition>> {
        match Target::parse(identifier) {
            Target::Method { class, method } => self.method(&class, &method),
            Target::Name(name) if self.provider.function_exists(&name) => self.function(&name),
            Target::Name(name) => self.class(&name),
        }
    }

    /// Class definition
    pub fn class(&self, class: &str) -> Result<Arc<Definition>> {
        cached(&self.classes, class, || {
            ClassDefinition::new(self.provider.as_ref(), class).map(Definition::Class)
        })
    }

    /// Function definition
    pub fn function(&self, function: &str) -> Result<Arc<Definition>> {
        cached(&self.functions, function, || {
            FunctionDefinition::new(self.provider.as_ref(), function).map(Definition::Function)
        })
    }

    /// Method definition for `class::method`
    pub fn method(&self, class: &str, method: &str) -> Result<Arc<Definition>> {
        cached(&self.methods, &method_name(class, method), || {
            let owner = self.class(class)?;
            MethodDefinition::new(self.provider.as_ref(), owner, method).map(Definition::Method)
        })
    }

    /// Closure definition (never cached)
    pub fn closure(&self, closure: Closure) -> Arc<Definition> {
        Arc::new(Definition::Closure(ClosureDefinition::new(
            self.provider.as_ref(),
            closure,
        )))
    }

    /// Number of cached definitions
    pub fn len(&self) -> usize {
        self.classes.len() + self.functions.len() + self.methods.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for DefinitionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefinitionRegistry")
            .field("classes", &self.classes.len())
            .field("functions", &self.functions.len())
            .field("methods", &self.methods.len())
            .finish()
    }
}

// No shard lock is held while building: building a method definition
// re-enters the class cache.
fn cached(
    cache: &DashMap<String, Arc<Definition>>,
    name: &str,
    build: impl FnOnce() -> Result<Definition>,
) -> Result<Arc<Definition>> {
    if let Some(existing) = cache.get(name) {
        return Ok(Arc::clone(existing.value()));
    }
    let definition = Arc::new(build()?);
    debug!(name, ?definition, "built definition");
    Ok(Arc::clone(
        cache.entry(name.to_string()).or_insert(definition).value(),
    ))
}
