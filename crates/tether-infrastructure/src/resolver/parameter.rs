//! Parameter descriptors
//!
//! Descriptors are derived once per declaring callable from its declared
//! [`ParameterSpec`]s and cached by (declaring class, member) or function
//! name. Closures have no stable identity and are derived on every use.

use std::sync::Arc;

use dashmap::DashMap;
use tether_domain::constants::CONSTRUCTOR_MEMBER;
use tether_domain::ports::{
    ClassInfo, Closure, FunctionInfo, MetadataProvider, MethodInfo, ParameterSpec, TypeRef,
};
use tether_domain::value_objects::Value;
use tether_domain::value_objects::identifier::method_name;
use tracing::trace;

/// Call name reported for closures
pub const CLOSURE_CALL_NAME: &str = "{closure}";

/// Derived facts about one parameter
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    position: usize,
    classes: Vec<String>,
    allows_null: bool,
    default: Option<Value>,
    call_name: Arc<str>,
}

impl Parameter {
    /// Derive a descriptor
    ///
    /// Builtin types are dropped from the candidate list, `self` becomes the
    /// declaring class and `parent` its parent (dropped when there is none).
    /// Untyped parameters and those typed `mixed`/`null` admit null.
    pub fn derive(
        spec: &ParameterSpec,
        position: usize,
        declaring: Option<&ClassInfo>,
        call_name: Arc<str>,
    ) -> Self {
        let classes = spec
            .types
            .iter()
            .filter_map(|declared| match declared {
                TypeRef::Builtin(_) => None,
                TypeRef::Class(name) => Some(name.clone()),
                TypeRef::SelfType => declaring.map(|class| class.name.clone()),
                TypeRef::Parent => declaring.and_then(|class| class.parent.clone()),
            })
            .collect();
        let allows_null =
            spec.nullable || spec.types.is_empty() || spec.types.iter().any(TypeRef::admits_null);

        Self {
            name: spec.name.clone(),
            position,
            classes,
            allows_null,
            default: spec.default.clone(),
            call_name,
        }
    }

    /// Parameter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 0-based position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Candidate class names in declaration order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// True when null is acceptable
    pub fn allows_null(&self) -> bool {
        self.allows_null
    }

    /// True when a default value is declared
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Declared default value
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Owning callable, e.g. `Greeter::new`
    pub fn call_name(&self) -> &str {
        &self.call_name
    }
}

/// Shared, ordered descriptor list
pub type Parameters = Arc<[Parameter]>;

fn derive_all(
    specs: &[ParameterSpec],
    declaring: Option<&ClassInfo>,
    call_name: &str,
) -> Parameters {
    let call_name: Arc<str> = Arc::from(call_name);
    specs
        .iter()
        .enumerate()
        .map(|(position, spec)| Parameter::derive(spec, position, declaring, Arc::clone(&call_name)))
        .collect()
}

/// Append-only descriptor cache
#[derive(Debug, Default)]
pub struct ParameterCache {
    members: DashMap<(String, String), Parameters>,
    functions: DashMap<String, Parameters>,
}

impl ParameterCache {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructor parameters of `class`
    pub fn constructor(&self, class: &ClassInfo) -> Option<Parameters> {
        let constructor = class.constructor.as_ref()?;
        let key = (class.name.clone(), CONSTRUCTOR_MEMBER.to_string());
        Some(self.member(key, || {
            derive_all(
                &constructor.params,
                Some(class),
                &method_name(&class.name, CONSTRUCTOR_MEMBER),
            )
        }))
    }

    /// Parameters of a method, resolving `self`/`parent` against its declaring class
    pub fn method(&self, provider: &dyn MetadataProvider, method: &MethodInfo) -> Parameters {
        let key = (method.class.clone(), method.name.clone());
        self.member(key, || {
            let declaring = provider.class_info(&method.class).ok();
            derive_all(
                &method.params,
                declaring.as_deref(),
                &method_name(&method.class, &method.name),
            )
        })
    }

    /// Parameters of a free function
    pub fn function(&self, function: &FunctionInfo) -> Parameters {
        if let Some(cached) = self.functions.get(&function.name) {
            return Arc::clone(cached.value());
        }
        trace!(function = %function.name, "deriving parameter descriptors");
        let derived = derive_all(&function.params, None, &function.name);
        Arc::clone(
            self.functions
                .entry(function.name.clone())
                .or_insert(derived)
                .value(),
        )
    }

    /// Parameters of a closure (never cached)
    pub fn closure(&self, closure: &Closure) -> Parameters {
        derive_all(&closure.params, None, CLOSURE_CALL_NAME)
    }

    /// Number of cached callables
    pub fn len(&self) -> usize {
        self.members.len() + self.functions.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn member(&self, key: (String, String), derive: impl FnOnce() -> Parameters) -> Parameters {
        if let Some(cached) = self.members.get(&key) {
            return Arc::clone(cached.value());
        }
        trace!(class = %key.0, member = %key.1, "deriving parameter descriptors");
        let derived = derive();
        Arc::clone(self.members.entry(key).or_insert(derived).value())
    }
}
