//! Container configuration types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tether_domain::constants::DEFAULT_MAX_DEPTH;
use tether_domain::value_objects::{ResolveStack, Source};

use crate::constants::{DEFAULT_CACHE_RESOLVERS, DEFAULT_DETECT_CYCLES};

/// Container configuration
///
/// ```toml
/// [container.definitions]
/// mailer = "SmtpMailer"
/// notify = "Notifier::send"
///
/// [container.resolution]
/// detect_cycles = true
/// max_depth = 64
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Identifier to source text (class, function or `Type::method`)
    pub definitions: BTreeMap<String, String>,

    /// Resolution policy
    pub resolution: ResolutionConfig,
}

impl ContainerConfig {
    /// Configured definitions as sources, in identifier order
    pub fn sources(&self) -> Vec<(String, Source)> {
        self.definitions
            .iter()
            .map(|(id, source)| (id.clone(), Source::from(source.as_str())))
            .collect()
    }
}

/// Resolution policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Fail fast when an identifier is requested while already in flight
    pub detect_cycles: bool,

    /// Maximum nesting of resolutions within one outer call
    pub max_depth: usize,

    /// Keep bound resolvers per named definition
    pub cache_resolvers: bool,
}

impl ResolutionConfig {
    /// Fresh resolve stack carrying this policy
    pub fn stack(&self) -> ResolveStack {
        ResolveStack::with_policy(self.detect_cycles, self.max_depth)
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            detect_cycles: DEFAULT_DETECT_CYCLES,
            max_depth: DEFAULT_MAX_DEPTH,
            cache_resolvers: DEFAULT_CACHE_RESOLVERS,
        }
    }
}
