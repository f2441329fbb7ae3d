//! Caller-supplied override maps
//!
//! Entries are keyed by parameter position or name. Two kinds of reserved
//! name keys exist:
//!
//! - `"$object"` supplies the receiver of an instance method, either as a live
//!   object or as the argument map used to construct it.
//! - `"$" + parameter` is a per-parameter bucket. Its name keys are candidate
//!   type names mapping to the arguments used to build that type.

use std::collections::HashMap;

use super::value::Value;
use crate::constants::{BUCKET_PREFIX, OBJECT_KEY};

/// Key of an override entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgumentKey {
    /// 0-based parameter position
    Position(usize),
    /// Parameter name, or a reserved `$` key
    Name(String),
}

impl From<usize> for ArgumentKey {
    fn from(position: usize) -> Self {
        Self::Position(position)
    }
}

impl From<&str> for ArgumentKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ArgumentKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Override map
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    entries: HashMap<ArgumentKey, Value>,
}

impl Arguments {
    /// Empty override map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value at a parameter position
    pub fn at(mut self, position: usize, value: impl Into<Value>) -> Self {
        self.insert(ArgumentKey::Position(position), value);
        self
    }

    /// Set the value for a parameter name
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(ArgumentKey::Name(name.into()), value);
        self
    }

    /// Add a bucket branch: build `type_name` with `arguments` for `parameter`
    pub fn bucket(
        mut self,
        parameter: &str,
        type_name: impl Into<String>,
        arguments: Arguments,
    ) -> Self {
        let key = ArgumentKey::Name(bucket_key(parameter));
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| Value::Arguments(Arguments::new()));
        if !matches!(entry, Value::Arguments(_)) {
            *entry = Value::Arguments(Arguments::new());
        }
        if let Value::Arguments(bucket) = entry {
            bucket.insert(ArgumentKey::Name(type_name.into()), Value::Arguments(arguments));
        }
        self
    }

    /// Supply the receiver (object or construction arguments)
    pub fn receiver(mut self, value: impl Into<Value>) -> Self {
        self.insert(ArgumentKey::Name(OBJECT_KEY.to_string()), value);
        self
    }

    /// Insert an entry, replacing any previous value
    pub fn insert(&mut self, key: impl Into<ArgumentKey>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Entry by key
    pub fn get(&self, key: &ArgumentKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Entry at a position
    pub fn position(&self, position: usize) -> Option<&Value> {
        self.entries.get(&ArgumentKey::Position(position))
    }

    /// Entry under a name
    pub fn name(&self, name: &str) -> Option<&Value> {
        self.entries.get(&ArgumentKey::Name(name.to_string()))
    }

    /// Raw bucket entry for a parameter
    pub fn bucket_for(&self, parameter: &str) -> Option<&Value> {
        self.name(&bucket_key(parameter))
    }

    /// Receiver entry
    pub fn object(&self) -> Option<&Value> {
        self.name(OBJECT_KEY)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&ArgumentKey, &Value)> {
        self.entries.iter()
    }

    /// Build an override map from a JSON object
    ///
    /// Keys that parse as integers become positions. An object under
    /// `"$object"` becomes the receiver's argument map; an object under any
    /// other `$` key becomes a bucket whose object entries are type branches.
    /// Every other value is carried as data.
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        json.as_object().map(|object| parse_map(object, false))
    }
}

fn parse_map(
    object: &serde_json::Map<String, serde_json::Value>,
    branches: bool,
) -> Arguments {
    let mut arguments = Arguments::new();
    for (key, value) in object {
        let parsed = match value.as_object() {
            Some(nested) if key == OBJECT_KEY => Value::Arguments(parse_map(nested, false)),
            Some(nested) if key.starts_with(BUCKET_PREFIX) => {
                Value::Arguments(parse_map(nested, true))
            }
            Some(nested) if branches => Value::Arguments(parse_map(nested, false)),
            _ => Value::data(value.clone()),
        };
        let key = key
            .parse::<usize>()
            .map_or_else(|_| ArgumentKey::Name(key.clone()), ArgumentKey::Position);
        arguments.insert(key, parsed);
    }
    arguments
}

/// Reserved key of the per-parameter bucket
pub fn bucket_key(parameter: &str) -> String {
    format!("{BUCKET_PREFIX}{parameter}")
}

impl FromIterator<(ArgumentKey, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (ArgumentKey, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
