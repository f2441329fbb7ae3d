//! Identifiers and definition sources
//!
//! An identifier is text naming a class, a free function or a
//! `"Type::member"` pair. A [`Source`] is anything that can be bound to an
//! identifier: text, an explicit class/method pair, a live object plus a
//! method name, or an inline closure.

use std::fmt;

use super::value::Instance;
use crate::constants::METHOD_SEPARATOR;
use crate::ports::introspection::Closure;

/// Parsed form of a textual identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Bare name: a function when one is registered under it, a class otherwise
    Name(String),
    /// `"Type::member"`, split on the first separator
    Method {
        /// Owning class
        class: String,
        /// Member name
        method: String,
    },
}

impl Target {
    /// Normalize and parse identifier text
    ///
    /// Surrounding whitespace and a leading `::` are dropped so that
    /// `" ::Mailer"` and `"Mailer"` denote the same target.
    pub fn parse(identifier: &str) -> Self {
        let text = normalize(identifier);
        match text.split_once(METHOD_SEPARATOR) {
            Some((class, method)) => Self::Method {
                class: class.trim().to_string(),
                method: method.trim().to_string(),
            },
            None => Self::Name(text.to_string()),
        }
    }

    /// Canonical text of the target
    pub fn canonical(&self) -> String {
        match self {
            Self::Name(name) => name.clone(),
            Self::Method { class, method } => method_name(class, method),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Method { class, method } => write!(f, "{class}{METHOD_SEPARATOR}{method}"),
        }
    }
}

/// Canonical `"Class::method"` text
pub fn method_name(class: &str, method: &str) -> String {
    format!("{class}{METHOD_SEPARATOR}{method}")
}

fn normalize(identifier: &str) -> &str {
    let text = identifier.trim();
    text.strip_prefix(METHOD_SEPARATOR).unwrap_or(text).trim()
}

/// Something that can be bound to an identifier
#[derive(Debug, Clone)]
pub enum Source {
    /// Identifier text (class, function or `"Type::member"`)
    Name(String),
    /// Explicit class and method
    Method {
        /// Owning class
        class: String,
        /// Member name
        method: String,
    },
    /// Method of a live object; the class is taken from the object
    Bound {
        /// The object whose class owns the method
        instance: Instance,
        /// Member name
        method: String,
    },
    /// Inline callable
    Closure(Closure),
}

impl Source {
    /// Source naming `class::method`
    pub fn method(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Method {
            class: class.into(),
            method: method.into(),
        }
    }

    /// Source naming `method` on the class of `instance`
    pub fn bound(instance: Instance, method: impl Into<String>) -> Self {
        Self::Bound {
            instance,
            method: method.into(),
        }
    }

    /// Text used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            Self::Name(name) => normalize(name).to_string(),
            Self::Method { class, method } => method_name(class, method),
            Self::Bound { instance, method } => method_name(instance.class(), method),
            Self::Closure(_) => "{closure}".to_string(),
        }
    }
}

impl From<&str> for Source {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Source {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Closure> for Source {
    fn from(closure: Closure) -> Self {
        Self::Closure(closure)
    }
}
