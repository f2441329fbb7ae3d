//! Resolver Dispatch
//!
//! Binds definitions to resolvers and runs them. Resolvers for named
//! definitions are cached by (kind, name); closures are bound on every use.

use std::sync::Arc;

use dashmap::DashMap;
use tether_domain::error::Result;
use tether_domain::ports::{ContainerInterface, MetadataProvider};
use tether_domain::value_objects::{Arguments, ResolveStack, Value};
use tracing::debug;

use super::Resolver;
use super::parameter::ParameterCache;
use crate::definition::{Definition, DefinitionKind};

/// Resolver cache and dispatcher
#[derive(Debug)]
pub struct ResolverDispatcher {
    resolvers: DashMap<(DefinitionKind, String), Arc<Resolver>>,
    parameters: ParameterCache,
    cache_resolvers: bool,
}

impl Default for ResolverDispatcher {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ResolverDispatcher {
    /// Dispatcher; `cache_resolvers` keeps bound resolvers per named definition
    pub fn new(cache_resolvers: bool) -> Self {
        Self {
            resolvers: DashMap::new(),
            parameters: ParameterCache::new(),
            cache_resolvers,
        }
    }

    /// Run the resolver bound to `definition`
    pub fn resolve(
        &self,
        container: &dyn ContainerInterface,
        stack: &mut ResolveStack,
        definition: &Definition,
        arguments: &Arguments,
    ) -> Result<Value> {
        let resolver = self.resolver(container.metadata(), definition);
        resolver.action(container, stack, arguments)
    }

    /// Resolver bound to `definition`
    pub fn resolver(&self, provider: &dyn MetadataProvider, definition: &Definition) -> Arc<Resolver> {
        let Some(name) = definition.name().filter(|_| self.cache_resolvers) else {
            return Arc::new(definition.resolver(provider, &self.parameters));
        };

        let key = (definition.kind(), name.to_string());
        if let Some(cached) = self.resolvers.get(&key) {
            return Arc::clone(cached.value());
        }
        let resolver = Arc::new(definition.resolver(provider, &self.parameters));
        debug!(kind = %key.0, name = %key.1, "cached resolver");
        Arc::clone(self.resolvers.entry(key).or_insert(resolver).value())
    }

    /// Number of cached resolvers
    pub fn cached_resolvers(&self) -> usize {
        self.resolvers.len()
    }

    /// Parameter descriptor cache
    pub fn parameters(&self) -> &ParameterCache {
        &self.parameters
    }
}
