//! Resolved values
//!
//! A [`Value`] is whatever resolution produces or a caller supplies: plain
//! data, a constructed object, or a nested override map.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::arguments::Arguments;

/// Type-erased shared object tagged with the class it was constructed as
#[derive(Clone)]
pub struct Instance {
    class: Arc<str>,
    object: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    /// Wrap a freshly built object
    pub fn new<T: Any + Send + Sync>(class: impl Into<Arc<str>>, object: T) -> Self {
        Self::from_any(class, Arc::new(object))
    }

    /// Wrap an already shared object
    pub fn from_arc<T: Any + Send + Sync>(class: impl Into<Arc<str>>, object: Arc<T>) -> Self {
        Self::from_any(class, object)
    }

    /// Wrap an erased object
    pub fn from_any(class: impl Into<Arc<str>>, object: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            class: class.into(),
            object,
        }
    }

    /// Class name the object was constructed as
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Borrow the object as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }

    /// Share the object as `T`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.object).downcast::<T>().ok()
    }

    /// True when both handles point at the same object
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

/// A value produced by resolution or supplied as an override
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    /// Scalar or structured data
    Data(serde_json::Value),
    /// Constructed object
    Object(Instance),
    /// Nested override map (receiver arguments, per-type buckets)
    Arguments(Arguments),
}

impl Value {
    /// Wrap JSON data, mapping JSON `null` to [`Value::Null`]
    pub fn data(value: impl Into<serde_json::Value>) -> Self {
        match value.into() {
            serde_json::Value::Null => Self::Null,
            other => Self::Data(other),
        }
    }

    /// Short name of the variant, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Data(serde_json::Value::Bool(_)) => "bool",
            Self::Data(serde_json::Value::Number(_)) => "number",
            Self::Data(serde_json::Value::String(_)) => "string",
            Self::Data(serde_json::Value::Array(_)) => "list",
            Self::Data(_) => "data",
            Self::Object(_) => "object",
            Self::Arguments(_) => "arguments",
        }
    }

    /// True for [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The object, if this is one
    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Self::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// The override map, if this is one
    pub fn as_arguments(&self) -> Option<&Arguments> {
        match self {
            Self::Arguments(arguments) => Some(arguments),
            _ => None,
        }
    }

    /// The data, if this is data
    pub fn as_data(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }

    /// String data
    pub fn as_str(&self) -> Option<&str> {
        self.as_data().and_then(serde_json::Value::as_str)
    }

    /// Integer data
    pub fn as_i64(&self) -> Option<i64> {
        self.as_data().and_then(serde_json::Value::as_i64)
    }

    /// Floating point data (integers widen)
    pub fn as_f64(&self) -> Option<f64> {
        self.as_data().and_then(serde_json::Value::as_f64)
    }

    /// Boolean data
    pub fn as_bool(&self) -> Option<bool> {
        self.as_data().and_then(serde_json::Value::as_bool)
    }

    /// Downcast an object value to `T`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.as_object().and_then(Instance::downcast::<T>)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Self::Object(instance)
    }
}

impl From<Arguments> for Value {
    fn from(arguments: Arguments) -> Self {
        Self::Arguments(arguments)
    }
}

impl From<serde_json::Value> for Value {
    fn from(data: serde_json::Value) -> Self {
        Self::data(data)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Data(serde_json::Value::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Data(serde_json::Value::from(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Data(serde_json::Value::from(b))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Data(serde_json::Value::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Data(serde_json::Value::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::data(n)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}
