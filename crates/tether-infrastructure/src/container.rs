//! Container
//!
//! Owns the definition registry, the resolver dispatcher, explicit
//! definitions and the shared-entry cache. Every build goes through
//! [`ContainerInterface::make_in`], which maintains the resolve stack for the
//! outer call and maps failures onto the error taxonomy:
//!
//! | Situation | Error |
//! |-----------|-------|
//! | no definition can be built for the identifier | `NotFound` |
//! | definition exists but is not resolvable | `Resolved` |
//! | a dependency of the identifier is unknown | `Resolved`, wrapping the `NotFound` |
//! | identifier already in flight | `CircularDependency` |
//!
//! ## Example
//!
//! ```ignore
//! let container = Container::new(Arc::new(table));
//! container.define("mailer", Source::from("SmtpMailer"))?;
//! let mailer = container.get("mailer")?;
//! ```

use std::sync::Arc;

use dashmap::DashMap;
use tether_domain::error::{Error, Result};
use tether_domain::ports::{ContainerInterface, MetadataProvider};
use tether_domain::value_objects::{Arguments, ResolveStack, Source, Value};
use tracing::{debug, info, warn};

use crate::config::{ContainerConfig, ResolutionConfig};
use crate::definition::{Definition, DefinitionRegistry};
use crate::resolver::ResolverDispatcher;
use crate::signature::SignatureTable;

/// Inversion-of-control container
pub struct Container {
    registry: DefinitionRegistry,
    dispatcher: ResolverDispatcher,
    definitions: DashMap<String, Arc<Definition>>,
    entries: DashMap<String, Value>,
    resolution: ResolutionConfig,
}

impl Container {
    /// Container with the default resolution policy and no explicit definitions
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self::with_resolution(provider, ResolutionConfig::default())
    }

    /// Container with a resolution policy
    pub fn with_resolution(provider: Arc<dyn MetadataProvider>, resolution: ResolutionConfig) -> Self {
        info!(
            detect_cycles = resolution.detect_cycles,
            max_depth = resolution.max_depth,
            cache_resolvers = resolution.cache_resolvers,
            "container created"
        );
        Self {
            registry: DefinitionRegistry::new(provider),
            dispatcher: ResolverDispatcher::new(resolution.cache_resolvers),
            definitions: DashMap::new(),
            entries: DashMap::new(),
            resolution,
        }
    }

    /// Container configured from a [`ContainerConfig`]
    ///
    /// Configured definitions go through [`init_definitions`](Self::init_definitions),
    /// so malformed entries are skipped.
    pub fn with_config(provider: Arc<dyn MetadataProvider>, config: &ContainerConfig) -> Self {
        let container = Self::with_resolution(provider, config.resolution);
        container.init_definitions(config.sources());
        container
    }

    /// Container over every signature module registered at compile time
    pub fn from_registry(config: &ContainerConfig) -> Self {
        Self::with_config(Arc::new(SignatureTable::from_registry()), config)
    }

    /// Replace the explicit definitions with `sources`
    ///
    /// Sources that fail to define or are not resolvable are skipped.
    /// Returns the number of definitions registered.
    pub fn init_definitions<I, S>(&self, sources: I) -> usize
    where
        I: IntoIterator<Item = (S, Source)>,
        S: Into<String>,
    {
        self.definitions.clear();

        let mut registered = 0;
        for (id, source) in sources {
            let id = id.into();
            match self.registry.make_safely(&source) {
                Some(definition) => {
                    self.definitions.insert(id.clone(), definition);
                    self.entries.remove(&id);
                    registered += 1;
                }
                None => warn!(id = %id, source = %source.describe(), "skipped definition"),
            }
        }

        debug!(registered, "definitions initialized");
        registered
    }

    /// Build `id` with `arguments` (always a fresh value)
    pub fn resolve(&self, id: &str, arguments: Arguments) -> Result<Value> {
        self.make(id, arguments)
    }

    /// True when a resolvable definition exists for `id`
    pub fn is_resolvable(&self, id: &str) -> bool {
        self.definition(id)
            .map(|definition| definition.is_resolvable())
            .unwrap_or(false)
    }

    /// Bind `id` to `source`
    pub fn define_identifier(&self, id: &str, source: Source) -> Result<()> {
        self.define(id, source)
    }

    /// Definition serving `id`: the explicit one, else the implicit one
    pub fn definition(&self, id: &str) -> Result<Arc<Definition>> {
        if let Some(definition) = self.definitions.get(id) {
            return Ok(Arc::clone(definition.value()));
        }
        self.registry.get(id)
    }

    /// Definition registry
    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    /// Resolver dispatcher
    pub fn dispatcher(&self) -> &ResolverDispatcher {
        &self.dispatcher
    }

    /// Resolution policy
    pub fn resolution(&self) -> ResolutionConfig {
        self.resolution
    }

    fn build(&self, stack: &mut ResolveStack, id: &str, arguments: &Arguments) -> Result<Value> {
        let definition = self
            .definition(id)
            .map_err(|_| Error::not_found(id, stack.trail()))?;

        stack.push(id)?;
        debug!(id, depth = stack.depth(), "resolving");

        if !definition.is_resolvable() && !self.has_live_receiver(&definition, arguments) {
            return Err(Error::resolved(
                format!("`{id}` is not resolvable"),
                stack.trail(),
            ));
        }

        let value = self
            .dispatcher
            .resolve(self, stack, &definition, arguments)
            .map_err(|e| {
                if matches!(&e, Error::NotFound { identifier, .. } if identifier != id) {
                    Error::resolved_with_source(
                        format!("a dependency of `{id}` could not be found"),
                        stack.trail(),
                        e,
                    )
                } else {
                    e
                }
            })?;

        stack.pop();
        Ok(value)
    }

    // An instance method whose owner cannot be built is still callable on a
    // receiver supplied through `$object`.
    fn has_live_receiver(&self, definition: &Definition, arguments: &Arguments) -> bool {
        let Definition::Method(method) = definition else {
            return false;
        };
        let info = method.info();
        info.is_public()
            && !info.is_abstract
            && !info.is_static
            && info.body.is_some()
            && matches!(
                arguments.object(),
                Some(Value::Object(instance)) if self.metadata().is_a(instance.class(), &info.class)
            )
    }
}

impl ContainerInterface for Container {
    fn metadata(&self) -> &dyn MetadataProvider {
        self.registry.provider().as_ref()
    }

    fn new_stack(&self) -> ResolveStack {
        self.resolution.stack()
    }

    fn make_in(&self, stack: &mut ResolveStack, id: &str, arguments: Arguments) -> Result<Value> {
        self.build(stack, id, &arguments)
    }

    fn define(&self, id: &str, source: Source) -> Result<()> {
        let definition = self.registry.make(&source)?;
        if !definition.is_resolvable() {
            return Err(Error::defined(
                source.describe(),
                format!("cannot be bound to `{id}`: not resolvable"),
            ));
        }
        debug!(id, source = %source.describe(), "defined");
        self.definitions.insert(id.to_string(), definition);
        self.entries.remove(id);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Value> {
        if let Some(entry) = self.entries.get(id) {
            return Ok(entry.value().clone());
        }
        let value = self.make(id, Arguments::new())?;
        Ok(self
            .entries
            .entry(id.to_string())
            .or_insert(value)
            .value()
            .clone())
    }

    fn set(&self, id: &str, value: Value) {
        self.entries.insert(id.to_string(), value);
    }

    fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
            || self.definitions.contains_key(id)
            || self.is_resolvable(id)
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registry", &self.registry)
            .field("definitions", &self.definitions.len())
            .field("entries", &self.entries.len())
            .field("resolution", &self.resolution)
            .finish()
    }
}
