//! Definitions
//!
//! A [`Definition`] describes how one identifier is built or invoked. The four
//! variants wrap the introspected metadata of their target and compute
//! resolvability once, when the definition is built.
//!
//! | Variant | Resolvable when |
//! |---------|-----------------|
//! | Class | concrete with a public constructor, or no constructor and blank construction |
//! | Function | neither disabled nor deprecated |
//! | Method | public, not abstract, and static or its owning class is resolvable |
//! | Closure | its signature passes inspection |

pub mod registry;

use std::fmt;
use std::sync::Arc;

use tether_domain::error::Result;
use tether_domain::ports::{ClassInfo, Closure, FunctionInfo, MetadataProvider, MethodInfo};
use tether_domain::value_objects::identifier::method_name;

use crate::resolver::{ParameterCache, Resolver};

pub use registry::DefinitionRegistry;

/// Definition kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// Class instantiation
    Class,
    /// Free function call
    Function,
    /// Method call
    Method,
    /// Inline closure call
    Closure,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Function => "function",
            Self::Method => "method",
            Self::Closure => "closure",
        };
        f.write_str(name)
    }
}

/// Instantiation of a class
pub struct ClassDefinition {
    info: Arc<ClassInfo>,
    resolvable: bool,
}

impl ClassDefinition {
    /// Look up `class` and compute its resolvability
    pub fn new(provider: &dyn MetadataProvider, class: &str) -> Result<Self> {
        let info = provider.class_info(class)?;
        let resolvable = info.is_instantiable();
        Ok(Self { info, resolvable })
    }

    /// Class metadata
    pub fn info(&self) -> &Arc<ClassInfo> {
        &self.info
    }
}

/// Call of a free function
pub struct FunctionDefinition {
    info: Arc<FunctionInfo>,
    resolvable: bool,
}

impl FunctionDefinition {
    /// Look up `function` and compute its resolvability
    pub fn new(provider: &dyn MetadataProvider, function: &str) -> Result<Self> {
        let info = provider.function_info(function)?;
        let resolvable = !info.disabled && !info.deprecated;
        Ok(Self { info, resolvable })
    }

    /// Function metadata
    pub fn info(&self) -> &Arc<FunctionInfo> {
        &self.info
    }
}

/// Call of a method on a class or its instance
pub struct MethodDefinition {
    name: String,
    class: Arc<Definition>,
    info: Arc<MethodInfo>,
    resolvable: bool,
}

impl MethodDefinition {
    /// Look up `method` through `class` and compute its resolvability
    ///
    /// `class` must be the class definition of the class named by the
    /// identifier, which may inherit the method from an ancestor.
    pub fn new(provider: &dyn MetadataProvider, class: Arc<Definition>, method: &str) -> Result<Self> {
        let class_name = class.name().unwrap_or_default().to_string();
        let info = provider.method_info(&class_name, method)?;
        let resolvable = info.is_public()
            && !info.is_abstract
            && info.body.is_some()
            && (info.is_static || class.is_resolvable());
        Ok(Self {
            name: method_name(&class_name, method),
            class,
            info,
            resolvable,
        })
    }

    /// Definition of the class named by the identifier
    pub fn class(&self) -> &Arc<Definition> {
        &self.class
    }

    /// Method metadata (the declaring class may be an ancestor)
    pub fn info(&self) -> &Arc<MethodInfo> {
        &self.info
    }
}

/// Call of an inline closure
pub struct ClosureDefinition {
    closure: Closure,
    resolvable: bool,
}

impl ClosureDefinition {
    /// Inspect `closure`; a malformed signature makes it non-resolvable
    pub fn new(provider: &dyn MetadataProvider, closure: Closure) -> Self {
        let resolvable = provider.inspect_closure(&closure).is_ok();
        Self {
            closure,
            resolvable,
        }
    }

    /// The closure
    pub fn closure(&self) -> &Closure {
        &self.closure
    }
}

/// How one identifier is built or invoked
pub enum Definition {
    /// Class instantiation
    Class(ClassDefinition),
    /// Free function call
    Function(FunctionDefinition),
    /// Method call
    Method(MethodDefinition),
    /// Inline closure call
    Closure(ClosureDefinition),
}

impl Definition {
    /// Definition kind
    pub fn kind(&self) -> DefinitionKind {
        match self {
            Self::Class(_) => DefinitionKind::Class,
            Self::Function(_) => DefinitionKind::Function,
            Self::Method(_) => DefinitionKind::Method,
            Self::Closure(_) => DefinitionKind::Closure,
        }
    }

    /// Normalized name; closures have none
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Class(class) => Some(&class.info.name),
            Self::Function(function) => Some(&function.info.name),
            Self::Method(method) => Some(&method.name),
            Self::Closure(_) => None,
        }
    }

    /// Whether the definition can be built at all
    pub fn is_resolvable(&self) -> bool {
        match self {
            Self::Class(class) => class.resolvable,
            Self::Function(function) => function.resolvable,
            Self::Method(method) => method.resolvable,
            Self::Closure(closure) => closure.resolvable,
        }
    }

    /// Bind an executor, deriving (or reusing) parameter descriptors
    pub fn resolver(&self, provider: &dyn MetadataProvider, parameters: &ParameterCache) -> Resolver {
        match self {
            Self::Class(class) => Resolver::Class {
                info: Arc::clone(&class.info),
                parameters: parameters.constructor(&class.info),
            },
            Self::Function(function) => Resolver::Function {
                info: Arc::clone(&function.info),
                parameters: parameters.function(&function.info),
            },
            Self::Method(method) => Resolver::Method {
                info: Arc::clone(&method.info),
                class: method.class.name().unwrap_or_default().to_string(),
                parameters: parameters.method(provider, &method.info),
            },
            Self::Closure(closure) => Resolver::Closure {
                closure: closure.closure.clone(),
                parameters: parameters.closure(&closure.closure),
            },
        }
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("resolvable", &self.is_resolvable())
            .finish()
    }
}
