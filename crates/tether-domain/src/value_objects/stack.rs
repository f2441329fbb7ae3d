//! Resolve stack and diagnostic trail
//!
//! One stack is created per outer `make` call and threaded through every
//! nested make. Identifiers are pushed before their definition is resolved
//! and popped after success; on failure the stack is abandoned and its frames
//! become the error's trail.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_DEPTH, TRAIL_SEPARATOR};
use crate::error::{Error, Result};
use super::identifier::Target;

/// Ordered identifiers rendered as `"A > B > C"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trail(Vec<String>);

impl Trail {
    /// Trail from identifiers, outermost first
    pub fn new(frames: Vec<String>) -> Self {
        Self(frames)
    }

    /// Identifiers, outermost first
    pub fn frames(&self) -> &[String] {
        &self.0
    }

    /// True when no identifier was in flight
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("-");
        }
        f.write_str(&self.0.join(TRAIL_SEPARATOR))
    }
}

/// Identifiers currently being resolved for one outer call
#[derive(Debug, Clone)]
pub struct ResolveStack {
    frames: Vec<String>,
    in_flight: HashMap<String, usize>,
    detect_cycles: bool,
    max_depth: usize,
}

impl Default for ResolveStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveStack {
    /// Stack with cycle detection and the default depth bound
    pub fn new() -> Self {
        Self::with_policy(true, DEFAULT_MAX_DEPTH)
    }

    /// Stack with an explicit policy
    pub fn with_policy(detect_cycles: bool, max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            in_flight: HashMap::new(),
            detect_cycles,
            max_depth,
        }
    }

    /// Enter `identifier`
    ///
    /// The identifier is normalized first, so `" ::Mailer"` and `"Mailer"`
    /// occupy the same frame. Fails when the identifier is already in flight (cycle detection on)
    /// or when the depth bound would be exceeded.
    pub fn push(&mut self, identifier: &str) -> Result<()> {
        let identifier = Target::parse(identifier).canonical();
        if self.detect_cycles && self.in_flight.contains_key(&identifier) {
            let mut frames = self.frames.clone();
            frames.push(identifier.clone());
            return Err(Error::circular(identifier, Trail::new(frames)));
        }
        if self.frames.len() >= self.max_depth {
            return Err(Error::resolved(
                format!(
                    "maximum resolution depth of {} exceeded while entering `{identifier}`",
                    self.max_depth
                ),
                self.trail(),
            ));
        }
        self.frames.push(identifier.clone());
        *self.in_flight.entry(identifier).or_insert(0) += 1;
        Ok(())
    }

    /// Leave the innermost identifier
    pub fn pop(&mut self) -> Option<String> {
        let identifier = self.frames.pop()?;
        if let Some(count) = self.in_flight.get_mut(&identifier) {
            *count -= 1;
            if *count == 0 {
                self.in_flight.remove(&identifier);
            }
        }
        Some(identifier)
    }

    /// True when `identifier` is in flight
    pub fn contains(&self, identifier: &str) -> bool {
        self.in_flight
            .contains_key(&Target::parse(identifier).canonical())
    }

    /// Number of identifiers in flight
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True when nothing is in flight
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Identifiers in flight, outermost first
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Snapshot of the frames for diagnostics
    pub fn trail(&self) -> Trail {
        Trail::new(self.frames.clone())
    }
}
