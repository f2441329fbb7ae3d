//! Positional argument list handed to factories and callable bodies

use std::any::Any;
use std::sync::Arc;

use super::value::Value;
use crate::error::{Error, Result};

/// Resolved arguments in declaration order
///
/// Accessors fail with a resolving error naming the callable and position, so
/// factories can use `?` throughout.
#[derive(Debug, Clone)]
pub struct Args {
    call_name: String,
    values: Vec<Value>,
}

impl Args {
    /// Wrap the resolved values of `call_name`
    pub fn new(call_name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            call_name: call_name.into(),
            values,
        }
    }

    /// Name of the callable receiving these arguments
    pub fn call_name(&self) -> &str {
        &self.call_name
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume into the raw values
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Value at `position`
    pub fn value(&self, position: usize) -> Result<&Value> {
        self.values.get(position).ok_or_else(|| {
            Error::build(format!(
                "{} expects an argument at position {position}, got {}",
                self.call_name,
                self.values.len()
            ))
        })
    }

    /// Object at `position`, downcast to `T`
    pub fn instance<T: Any + Send + Sync>(&self, position: usize) -> Result<Arc<T>> {
        let value = self.value(position)?;
        value
            .downcast::<T>()
            .ok_or_else(|| self.mismatch(position, std::any::type_name::<T>(), value))
    }

    /// Object at `position`, or `None` when the argument is null
    pub fn opt_instance<T: Any + Send + Sync>(&self, position: usize) -> Result<Option<Arc<T>>> {
        match self.value(position)? {
            Value::Null => Ok(None),
            _ => self.instance(position).map(Some),
        }
    }

    /// String at `position`
    pub fn str(&self, position: usize) -> Result<&str> {
        let value = self.value(position)?;
        value
            .as_str()
            .ok_or_else(|| self.mismatch(position, "string", value))
    }

    /// String at `position`, or `None` when the argument is null
    pub fn opt_str(&self, position: usize) -> Result<Option<&str>> {
        match self.value(position)? {
            Value::Null => Ok(None),
            _ => self.str(position).map(Some),
        }
    }

    /// Integer at `position`
    pub fn i64(&self, position: usize) -> Result<i64> {
        let value = self.value(position)?;
        value
            .as_i64()
            .ok_or_else(|| self.mismatch(position, "int", value))
    }

    /// Number at `position`
    pub fn f64(&self, position: usize) -> Result<f64> {
        let value = self.value(position)?;
        value
            .as_f64()
            .ok_or_else(|| self.mismatch(position, "float", value))
    }

    /// Boolean at `position`
    pub fn bool(&self, position: usize) -> Result<bool> {
        let value = self.value(position)?;
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(position, "bool", value))
    }

    fn mismatch(&self, position: usize, expected: &str, found: &Value) -> Error {
        Error::build(format!(
            "argument {position} of {} must be {expected}, found {}",
            self.call_name,
            match found {
                Value::Object(instance) => instance.class(),
                other => other.kind(),
            }
        ))
    }
}
