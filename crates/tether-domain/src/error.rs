//! Error handling types
//!
//! Failures are layered so callers can tell an unknown identifier apart from
//! a known one that cannot be built:
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | `Reflected` | the metadata provider has no such class / function / method |
//! | `Defined` | an identifier or source cannot be turned into a definition |
//! | `NotFound` | the requested identifier has no definition at all |
//! | `Resolved` | a definition exists but construction or invocation failed |
//! | `CircularDependency` | an identifier is requested while already in flight |

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::Trail;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// What the metadata provider could not find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReflectedCode {
    /// No class registered under the name
    ClassNotExist,
    /// Class exists but neither it nor an ancestor declares the member
    MethodNotExist,
    /// No free function registered under the name
    FunctionNotExist,
    /// A callable signature is malformed (duplicate or empty parameter names)
    InvalidSignature,
}

impl ReflectedCode {
    /// Stable numeric code
    pub fn code(self) -> u32 {
        match self {
            Self::ClassNotExist => 1,
            Self::MethodNotExist => 2,
            Self::FunctionNotExist => 3,
            Self::InvalidSignature => 4,
        }
    }
}

impl fmt::Display for ReflectedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ClassNotExist => "class does not exist",
            Self::MethodNotExist => "method does not exist",
            Self::FunctionNotExist => "function does not exist",
            Self::InvalidSignature => "invalid signature",
        };
        f.write_str(text)
    }
}

/// Main error type for the Tether resolution engine
#[derive(Error, Debug)]
pub enum Error {
    /// Introspection of the underlying target failed
    #[error("Reflection error: {code}: {target}")]
    Reflected {
        /// What kind of target was missing
        code: ReflectedCode,
        /// The class, function or `Class::method` that was looked up
        target: String,
    },

    /// An identifier could not be normalized into a definition
    #[error("Definition error for `{identifier}`: {message}")]
    Defined {
        /// Identifier or source being defined
        identifier: String,
        /// Description of the failure
        message: String,
        /// Underlying reflection failure, if any
        #[source]
        source: Option<Box<Error>>,
    },

    /// No definition exists for the requested identifier
    #[error("No entry was found for `{identifier}` (resolving: {trail})")]
    NotFound {
        /// The identifier that was requested
        identifier: String,
        /// Identifiers in flight when the lookup failed
        trail: Trail,
    },

    /// A definition exists but could not be constructed or invoked
    #[error("Resolving error: {message} (resolving: {trail})")]
    Resolved {
        /// Description of the failure
        message: String,
        /// Identifiers in flight when the failure happened
        trail: Trail,
        /// Nested failure, if this wraps one
        #[source]
        source: Option<Box<Error>>,
    },

    /// The identifier is already being resolved further up the stack
    #[error("Circular dependency detected on `{identifier}` (resolving: {trail})")]
    CircularDependency {
        /// The identifier that closed the cycle
        identifier: String,
        /// Full cycle, ending with the repeated identifier
        trail: Trail,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a reflection error
    pub fn reflected<S: Into<String>>(code: ReflectedCode, target: S) -> Self {
        Self::Reflected {
            code,
            target: target.into(),
        }
    }

    /// Create a definition error
    pub fn defined<I: Into<String>, S: Into<String>>(identifier: I, message: S) -> Self {
        Self::Defined {
            identifier: identifier.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a definition error wrapping an underlying failure
    pub fn defined_with_source<I: Into<String>, S: Into<String>>(
        identifier: I,
        message: S,
        source: Error,
    ) -> Self {
        Self::Defined {
            identifier: identifier.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(identifier: S, trail: Trail) -> Self {
        Self::NotFound {
            identifier: identifier.into(),
            trail,
        }
    }

    /// Create a resolving error
    pub fn resolved<S: Into<String>>(message: S, trail: Trail) -> Self {
        Self::Resolved {
            message: message.into(),
            trail,
            source: None,
        }
    }

    /// Create a resolving error wrapping a nested failure
    pub fn resolved_with_source<S: Into<String>>(message: S, trail: Trail, source: Error) -> Self {
        Self::Resolved {
            message: message.into(),
            trail,
            source: Some(Box::new(source)),
        }
    }

    /// Create a resolving error without a trail
    ///
    /// Intended for factories and callable bodies; the container attaches the
    /// active trail when the error passes through it.
    pub fn build<S: Into<String>>(message: S) -> Self {
        Self::resolved(message, Trail::default())
    }

    /// Create a circular dependency error
    pub fn circular<S: Into<String>>(identifier: S, trail: Trail) -> Self {
        Self::CircularDependency {
            identifier: identifier.into(),
            trail,
        }
    }
}

// Ambient error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification
impl Error {
    /// True when the identifier itself is unknown
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when a known definition could not be built
    pub fn is_build_failure(&self) -> bool {
        matches!(
            self,
            Self::Resolved { .. } | Self::CircularDependency { .. }
        )
    }

    /// True when definition building failed
    pub fn is_definition_failure(&self) -> bool {
        matches!(self, Self::Defined { .. } | Self::Reflected { .. })
    }

    /// Diagnostic trail carried by the error, if any
    pub fn trail(&self) -> Option<&Trail> {
        match self {
            Self::NotFound { trail, .. }
            | Self::Resolved { trail, .. }
            | Self::CircularDependency { trail, .. } => Some(trail),
            _ => None,
        }
    }

    /// Fill in the trail of a resolving error that was raised without one
    pub fn with_trail(self, active: Trail) -> Self {
        match self {
            Self::Resolved {
                message,
                trail,
                source,
            } if trail.is_empty() => Self::Resolved {
                message,
                trail: active,
                source,
            },
            other => other,
        }
    }
}
