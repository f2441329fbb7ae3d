//! Metadata Introspection Port
//!
//! Structural facts about constructible units: whether a class can be
//! instantiated, the ordered parameters of constructors, functions and
//! methods, and member visibility. Rust has no runtime reflection, so the
//! facts are declared up front together with the factory or body that
//! performs the construction or call.
//!
//! ```ignore
//! let greeter = ClassInfo::new("Greeter").constructor(
//!     vec![ParameterSpec::new("name").typed("string").default_value("world")],
//!     |args| Ok(Greeter { name: args.str(0)?.to_string() }),
//! );
//! ```

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::{BUILTIN_TYPES, NULLABLE_BUILTIN_TYPES};
use crate::error::{Error, ReflectedCode, Result};
use crate::value_objects::{Args, Instance, Value};

/// Erased constructor
pub type ConstructFn = Arc<dyn Fn(Args) -> Result<Arc<dyn Any + Send + Sync>> + Send + Sync>;

/// Erased construction without a declared constructor
pub type BlankFn = Arc<dyn Fn() -> Result<Arc<dyn Any + Send + Sync>> + Send + Sync>;

/// Erased function or closure body
pub type InvokeFn = Arc<dyn Fn(Args) -> Result<Value> + Send + Sync>;

/// Erased method body; the receiver is `None` for static methods
pub type MethodFn = Arc<dyn Fn(Option<&Instance>, Args) -> Result<Value> + Send + Sync>;

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Callable from anywhere
    #[default]
    Public,
    /// Callable from the class hierarchy only
    Protected,
    /// Callable from the declaring class only
    Private,
}

/// Declared type of a parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Scalar or otherwise non-constructible type
    Builtin(String),
    /// Class or interface name
    Class(String),
    /// The declaring class
    SelfType,
    /// The parent of the declaring class
    Parent,
}

impl TypeRef {
    /// Classify a type name
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        match name {
            "self" => Self::SelfType,
            "parent" => Self::Parent,
            _ if BUILTIN_TYPES.contains(&name) => Self::Builtin(name.to_string()),
            _ => Self::Class(name.to_string()),
        }
    }

    /// True for builtin types that admit `null`
    pub fn admits_null(&self) -> bool {
        matches!(self, Self::Builtin(name) if NULLABLE_BUILTIN_TYPES.contains(&name.as_str()))
    }
}

/// Declared parameter of a constructor, function, method or closure
///
/// Position is implied by declaration order.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    /// Parameter name
    pub name: String,
    /// Declared types in order (a union when more than one)
    pub types: Vec<TypeRef>,
    /// Explicitly nullable
    pub nullable: bool,
    /// Default value, if declared
    pub default: Option<Value>,
}

impl ParameterSpec {
    /// Untyped parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
            nullable: false,
            default: None,
        }
    }

    /// Add a declared type (call repeatedly for a union)
    pub fn typed(mut self, type_name: &str) -> Self {
        self.types.push(TypeRef::parse(type_name));
        self
    }

    /// Mark the parameter nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Declare a default value
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Declared constructor
#[derive(Clone)]
pub struct ConstructorInfo {
    /// Constructor visibility
    pub visibility: Visibility,
    /// Constructor parameters
    pub params: Vec<ParameterSpec>,
    /// Builds the object from resolved arguments
    pub factory: ConstructFn,
}

/// Class metadata
#[derive(Clone)]
pub struct ClassInfo {
    /// Class name
    pub name: String,
    /// Parent class
    pub parent: Option<String>,
    /// Implemented interfaces
    pub interfaces: Vec<String>,
    /// Abstract class or interface
    pub is_abstract: bool,
    /// Declared constructor
    pub constructor: Option<ConstructorInfo>,
    /// Construction when no constructor is declared
    pub blank: Option<BlankFn>,
}

impl ClassInfo {
    /// Concrete class with neither constructor nor blank construction
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            interfaces: Vec::new(),
            is_abstract: false,
            constructor: None,
            blank: None,
        }
    }

    /// Interface: abstract, never instantiable
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name).abstract_class()
    }

    /// Mark the class abstract
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Set the parent class
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add an implemented interface
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Declare a public constructor
    pub fn constructor<T, F>(mut self, params: Vec<ParameterSpec>, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Args) -> Result<T> + Send + Sync + 'static,
    {
        self.constructor = Some(ConstructorInfo {
            visibility: Visibility::Public,
            params,
            factory: Arc::new(move |args| {
                factory(args).map(|object| Arc::new(object) as Arc<dyn Any + Send + Sync>)
            }),
        });
        self
    }

    /// Change the visibility of the declared constructor
    pub fn constructor_visibility(mut self, visibility: Visibility) -> Self {
        if let Some(constructor) = self.constructor.as_mut() {
            constructor.visibility = visibility;
        }
        self
    }

    /// Allow construction without a declared constructor
    pub fn instantiate_with<T, F>(mut self, blank: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.blank = Some(Arc::new(move || {
            Ok(Arc::new(blank()) as Arc<dyn Any + Send + Sync>)
        }));
        self
    }

    /// Concrete with an accessible constructor, or with blank construction
    pub fn is_instantiable(&self) -> bool {
        if self.is_abstract {
            return false;
        }
        match &self.constructor {
            Some(constructor) => constructor.visibility == Visibility::Public,
            None => self.blank.is_some(),
        }
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("interfaces", &self.interfaces)
            .field("is_abstract", &self.is_abstract)
            .field(
                "constructor",
                &self.constructor.as_ref().map(|c| (c.visibility, c.params.len())),
            )
            .finish_non_exhaustive()
    }
}

/// Free function metadata
#[derive(Clone)]
pub struct FunctionInfo {
    /// Function name
    pub name: String,
    /// Parameters in order
    pub params: Vec<ParameterSpec>,
    /// Deprecated functions are not resolvable
    pub deprecated: bool,
    /// Disabled functions are not resolvable
    pub disabled: bool,
    /// Function body
    pub body: InvokeFn,
}

impl FunctionInfo {
    /// Declare a function
    pub fn new<F>(name: impl Into<String>, params: Vec<ParameterSpec>, body: F) -> Self
    where
        F: Fn(Args) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params,
            deprecated: false,
            disabled: false,
            body: Arc::new(body),
        }
    }

    /// Mark deprecated
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Mark disabled
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl fmt::Debug for FunctionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionInfo")
            .field("name", &self.name)
            .field("params", &self.params.len())
            .field("deprecated", &self.deprecated)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// Method metadata
#[derive(Clone)]
pub struct MethodInfo {
    /// Declaring class
    pub class: String,
    /// Method name
    pub name: String,
    /// Method visibility
    pub visibility: Visibility,
    /// Abstract methods have no body
    pub is_abstract: bool,
    /// Static methods take no receiver
    pub is_static: bool,
    /// Parameters in order
    pub params: Vec<ParameterSpec>,
    /// Method body
    pub body: Option<MethodFn>,
}

impl MethodInfo {
    /// Declare a public instance method
    pub fn new<F>(
        class: impl Into<String>,
        name: impl Into<String>,
        params: Vec<ParameterSpec>,
        body: F,
    ) -> Self
    where
        F: Fn(Option<&Instance>, Args) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            class: class.into(),
            name: name.into(),
            visibility: Visibility::Public,
            is_abstract: false,
            is_static: false,
            params,
            body: Some(Arc::new(body)),
        }
    }

    /// Declare an abstract method
    pub fn abstract_method(
        class: impl Into<String>,
        name: impl Into<String>,
        params: Vec<ParameterSpec>,
    ) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            visibility: Visibility::Public,
            is_abstract: true,
            is_static: false,
            params,
            body: None,
        }
    }

    /// Mark static
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Change visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// True for public methods
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("class", &self.class)
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("is_abstract", &self.is_abstract)
            .field("is_static", &self.is_static)
            .field("params", &self.params.len())
            .finish_non_exhaustive()
    }
}

/// Inline callable with its declared parameters
#[derive(Clone)]
pub struct Closure {
    /// Parameters in order
    pub params: Vec<ParameterSpec>,
    /// Closure body
    pub body: InvokeFn,
}

impl Closure {
    /// Declare a closure
    pub fn new<F>(params: Vec<ParameterSpec>, body: F) -> Self
    where
        F: Fn(Args) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            params,
            body: Arc::new(body),
        }
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params.len())
            .finish_non_exhaustive()
    }
}

/// Port: structural facts about constructible units
pub trait MetadataProvider: Send + Sync {
    /// Class metadata
    fn class_info(&self, class: &str) -> Result<Arc<ClassInfo>>;

    /// Free function metadata
    fn function_info(&self, function: &str) -> Result<Arc<FunctionInfo>>;

    /// Method metadata, looked up through the parent chain
    fn method_info(&self, class: &str, method: &str) -> Result<Arc<MethodInfo>>;

    /// True when a free function is registered under the name
    fn function_exists(&self, function: &str) -> bool;

    /// Check a closure's signature
    fn inspect_closure(&self, closure: &Closure) -> Result<()> {
        let mut seen = HashSet::new();
        for param in &closure.params {
            if param.name.is_empty() || !seen.insert(param.name.as_str()) {
                return Err(Error::reflected(
                    ReflectedCode::InvalidSignature,
                    format!("{{closure}}({})", param.name),
                ));
            }
        }
        Ok(())
    }

    /// True when `class` is `ancestor` or extends / implements it transitively
    fn is_a(&self, class: &str, ancestor: &str) -> bool {
        let mut pending = vec![class.to_string()];
        let mut visited = HashSet::new();
        while let Some(current) = pending.pop() {
            if current == ancestor {
                return true;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Ok(info) = self.class_info(&current) {
                pending.extend(info.parent.iter().cloned());
                pending.extend(info.interfaces.iter().cloned());
            }
        }
        false
    }
}
